//! The add/edit form, as a small state machine
//!
//! The form is either creating a brand new task, or editing an existing one.
//! Submitting it validates the input and produces a [`Submission`], that the caller sends to the remote store.
//! Nothing here performs any network call.

use crate::task::{parse_datetime, NewTask, Priority, Task, TaskId, TaskStatus};

/// Reasons a form submission is refused
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("a title is required")]
    MissingTitle,
    #[error("a date and time are required")]
    MissingDateTime,
    #[error("invalid date and time {0:?}")]
    InvalidDateTime(String),
    #[error("a submission is already in progress")]
    SubmitInFlight,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// The status is carried over unchanged when the edit is saved
    Edit { id: TaskId, status: TaskStatus },
}

impl Default for FormMode {
    fn default() -> Self {
        FormMode::Create
    }
}

/// The remote call a valid form turns into
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(NewTask),
    Update(TaskId, NewTask),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormController {
    mode: FormMode,
    is_open: bool,
    in_flight: bool,

    pub title: String,
    pub description: String,
    /// The date and time, as typed (e.g. `2024-03-04T09:00`)
    pub datetime: String,
    pub priority: Priority,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode { &self.mode }
    pub fn is_open(&self) -> bool   { self.is_open }
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit{..})
    }
    /// Whether a submission has been handed out and has not been finished yet
    pub fn is_submitting(&self) -> bool { self.in_flight }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() { "Edit Task" } else { "Add Task" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Save Changes" } else { "Add Task" }
    }

    /// Open the form for a new task.
    /// Fields that were left over by a previous, cancelled, creation are cleared.
    pub fn open_create(&mut self) {
        if self.in_flight {
            log::debug!("Not opening the form while a submission is in flight");
            return;
        }
        self.reset();
        self.is_open = true;
    }

    /// Open the form pre-filled with an existing task
    pub fn open_edit(&mut self, task: &Task) {
        if self.in_flight {
            log::debug!("Not opening the form while a submission is in flight");
            return;
        }
        self.mode = FormMode::Edit { id: task.id().clone(), status: task.status() };
        self.title = task.title().to_string();
        self.description = task.description().to_string();
        self.datetime = task.datetime().format("%Y-%m-%dT%H:%M").to_string();
        self.priority = task.priority();
        self.is_open = true;
    }

    /// Close the form and forget its input. No call is made.
    ///
    /// This also forgets a submission still in flight, so that a form whose submission was abandoned (e.g. its future was dropped) can be used again.
    pub fn cancel(&mut self) {
        if self.in_flight {
            log::debug!("Forgetting the submission in flight");
        }
        self.reset();
    }

    /// Validate the input and turn it into the call to make.
    ///
    /// On success, the form is marked as in flight until [`Self::finish_submit`] is called; further submissions are refused meanwhile.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.in_flight {
            return Err(FormError::SubmitInFlight);
        }
        if self.title.trim().is_empty() {
            return Err(FormError::MissingTitle);
        }
        if self.datetime.trim().is_empty() {
            return Err(FormError::MissingDateTime);
        }
        let datetime = parse_datetime(&self.datetime)
            .ok_or_else(|| FormError::InvalidDateTime(self.datetime.clone()))?;

        let submission = match &self.mode {
            FormMode::Create => {
                Submission::Create(NewTask::new(self.title.clone(), self.description.clone(), datetime, self.priority))
            },
            FormMode::Edit { id, status } => {
                let payload = NewTask {
                    title: self.title.clone(),
                    description: self.description.clone(),
                    datetime,
                    priority: self.priority,
                    status: *status,
                };
                Submission::Update(id.clone(), payload)
            },
        };
        self.in_flight = true;
        Ok(submission)
    }

    /// Tell the form how its submission went.
    ///
    /// After a success, the form is closed and blank. After a failure, it stays open with its input intact, so that the user can try again.
    pub fn finish_submit(&mut self, success: bool) {
        self.in_flight = false;
        if success {
            self.reset();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}
