use async_trait::async_trait;

use crate::error::Result;
use crate::task::{NewTask, Task, TaskId};

/// A remote store of tasks.
///
/// Every call is a round trip, and may fail (e.g. in case of a network error).
/// The server is the authority for identifiers and for any normalization of the submitted fields.
#[async_trait]
pub trait TaskSource {
    /// Returns every task the store contains
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    /// Creates a task, and returns it the way the store recorded it
    async fn create_task(&mut self, new_task: NewTask) -> Result<Task>;
    /// Replaces every field of a task, and returns its new representation
    async fn update_task(&mut self, id: &TaskId, payload: NewTask) -> Result<Task>;
    /// Removes a task
    async fn delete_task(&mut self, id: &TaskId) -> Result<()>;
}
