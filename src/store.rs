//! This module provides the client-side mirror of the remote task store

use crate::task::{Task, TaskId};

/// The tasks the server returned last.
///
/// This is only ever modified with data that comes from the server, once a call has succeeded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// Replace the whole content, after a successful list call.
    ///
    /// Tasks sharing an identifier with an earlier task are dropped, so that identifiers stay unique.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        let mut unique: Vec<Task> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if unique.iter().any(|t| t.id() == task.id()) {
                log::warn!("Server returned task {} twice. Ignoring the duplicate", task.id());
                continue;
            }
            unique.push(task);
        }
        log::info!("Task store now contains {} tasks", unique.len());
        self.tasks = unique;
    }

    /// Add a task the server has just created.
    /// In case a task with the same id is known already, it is replaced instead.
    pub fn append(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            Some(existing) => {
                log::warn!("Task {} is already in the store. Replacing it", task.id());
                *existing = task;
            },
            None => self.tasks.push(task),
        }
    }

    /// Replace the entry matching `id` with the server representation.
    /// Returns false (and changes nothing) in case no such entry exists.
    ///
    /// In case the server returned the task under another id, the entry takes that id, and any other entry that already had it is dropped.
    pub fn replace(&mut self, id: &TaskId, task: Task) -> bool {
        let mut index = match self.tasks.iter().position(|t| t.id() == id) {
            Some(index) => index,
            None => {
                log::warn!("Unable to replace task {}: it is not in the store", id);
                return false;
            },
        };

        if task.id() != id {
            log::warn!("Server returned task {} as {}. Keeping the id it returned", id, task.id());
            if let Some(duplicate) = self.tasks.iter().position(|t| t.id() == task.id()) {
                self.tasks.remove(duplicate);
                if duplicate < index {
                    index -= 1;
                }
            }
        }
        self.tasks[index] = task;
        true
    }

    /// Returns the removed task, if any
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id() == id)?;
        Some(self.tasks.remove(index))
    }
}
