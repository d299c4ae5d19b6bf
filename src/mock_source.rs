//! An in-memory [`TaskSource`], that behaves like the remote task store.
//!
//! It is useful to test an app without any server, and its failures can be tweaked with a [`MockBehaviour`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::mock_behaviour::{Call, MockBehaviour};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskSource;

#[derive(Debug, Default)]
pub struct MockSource {
    tasks: Vec<Task>,
    calls: usize,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that already contains these tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, ..Self::default() }
    }

    /// Share a behaviour with this source, so that the caller can still tweak it afterwards
    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    /// What the store currently contains
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// How many create, update and delete calls this source has received (whether they succeeded or not)
    pub fn call_count(&self) -> usize {
        self.calls
    }

    fn check(&self, call: Call) -> Result<()> {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = behaviour.lock()
                    .map_err(|_| Error::Mocked("mock behaviour lock is poisoned".to_string()))?;
                behaviour.check(call)
            },
        }
    }
}

#[async_trait]
impl TaskSource for MockSource {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.check(Call::List)?;
        Ok(self.tasks.clone())
    }

    async fn create_task(&mut self, new_task: NewTask) -> Result<Task> {
        self.calls += 1;
        self.check(Call::Create)?;

        let id = TaskId::from(uuid::Uuid::new_v4().to_hyphenated().to_string());
        let task = Task::from_new(id, new_task);
        self.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&mut self, id: &TaskId, payload: NewTask) -> Result<Task> {
        self.calls += 1;
        self.check(Call::Update)?;

        match self.tasks.iter_mut().find(|t| t.id() == id) {
            None => Err(Error::Mocked(format!("No task with id {}", id))),
            Some(slot) => {
                *slot = Task::from_new(id.clone(), payload);
                Ok(slot.clone())
            },
        }
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        self.calls += 1;
        self.check(Call::Delete)?;

        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        if self.tasks.len() == len_before {
            return Err(Error::Mocked(format!("No task with id {}", id)));
        }
        Ok(())
    }
}
