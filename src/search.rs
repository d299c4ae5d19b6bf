//! Filtering of tasks by a free-text query

use crate::task::Task;

/// A case-insensitive substring search over task titles and descriptions.
///
/// An empty query matches every task.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
    lowercase_query: String,
}

impl SearchFilter {
    pub fn new<S: Into<String>>(query: S) -> Self {
        let query = query.into();
        let lowercase_query = query.to_lowercase();
        Self { query, lowercase_query }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.is_empty() {
            return true;
        }
        task.title().to_lowercase().contains(&self.lowercase_query)
            || task.description().to_lowercase().contains(&self.lowercase_query)
    }

    /// Keeps the matching tasks, in their original order
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter()
            .filter(|task| self.matches(task))
            .collect()
    }
}
