//! The state of a task list app, and the operations that change it
//!
//! [`AppState`] holds everything the interface displays: the store mirror, the form, the search query and which weeks are unfolded.
//! It only changes through its methods, and it never talks to the network. \
//! [`App`] pairs an `AppState` with a [`TaskSource`], and runs the round trips that keep the store in sync with the server.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::form::{FormController, FormError, Submission};
use crate::search::SearchFilter;
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::traits::TaskSource;
use crate::week::{group_by_week, Progress, WeekBucket};


/// A week, ready to be displayed
#[derive(Clone, Debug, PartialEq)]
pub struct WeekView<'a> {
    pub bucket: WeekBucket<'a>,
    pub label: String,
    pub progress: Progress,
    /// Whether the user has unfolded this week
    pub open: bool,
}

impl<'a> WeekView<'a> {
    pub fn key(&self) -> NaiveDate {
        self.bucket.key()
    }

    pub fn tasks(&self) -> &[&'a Task] {
        self.bucket.tasks()
    }
}


/// What happened to a form submission that did not fail on the network
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The form refused the submission. No call was made
    Rejected(FormError),
    Created(TaskId),
    Updated(TaskId),
}


#[derive(Clone, Debug, Default)]
pub struct AppState {
    store: TaskStore,
    form: FormController,
    search: SearchFilter,
    open_weeks: HashSet<NaiveDate>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &TaskStore           { &self.store  }
    pub fn form(&self) -> &FormController       { &self.form   }
    /// Gives access to the form fields, so that the user can type into them
    pub fn form_mut(&mut self) -> &mut FormController { &mut self.form }
    pub fn search(&self) -> &SearchFilter       { &self.search }

    pub fn set_search<S: Into<String>>(&mut self, query: S) {
        self.search = SearchFilter::new(query);
    }

    /// Fold or unfold a week.
    /// This is remembered by week, so it survives re-grouping (e.g. after a search).
    pub fn toggle_week(&mut self, key: NaiveDate) {
        if self.open_weeks.remove(&key) == false {
            self.open_weeks.insert(key);
        }
    }

    /// Weeks are folded unless the user unfolded them
    pub fn is_week_open(&self, key: NaiveDate) -> bool {
        self.open_weeks.contains(&key)
    }

    /// The tasks matching the current search, grouped by week
    pub fn weeks(&self) -> Vec<WeekView<'_>> {
        let filtered = self.search.apply(self.store.tasks());
        group_by_week(filtered)
            .into_iter()
            .map(|bucket| WeekView {
                label: bucket.date_range_label(),
                progress: bucket.progress(),
                open: self.is_week_open(bucket.key()),
                bucket,
            })
            .collect()
    }

    pub fn open_create_form(&mut self) {
        self.form.open_create();
    }

    /// Returns false in case the task is unknown
    pub fn open_edit_form(&mut self, id: &TaskId) -> bool {
        match self.store.get(id) {
            None => {
                log::warn!("Cannot edit task {}: it is not in the store", id);
                false
            },
            Some(task) => {
                self.form.open_edit(task);
                true
            },
        }
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    pub fn begin_submit(&mut self) -> std::result::Result<Submission, FormError> {
        self.form.begin_submit()
    }

    /// Reconcile the result of a submission call into the store and the form
    pub fn finish_submit(&mut self, submission: &Submission, result: Result<Task>) -> Result<SubmitOutcome> {
        match result {
            Err(err) => {
                log::warn!("Unable to save the task: {}", err);
                self.form.finish_submit(false);
                Err(err)
            },
            Ok(task) => {
                self.form.finish_submit(true);
                let outcome = match submission {
                    Submission::Create(_) => {
                        log::info!("Task {} created", task.id());
                        let id = task.id().clone();
                        self.store.append(task);
                        SubmitOutcome::Created(id)
                    },
                    Submission::Update(id, _) => {
                        log::info!("Task {} updated", id);
                        let returned_id = task.id().clone();
                        self.store.replace(id, task);
                        SubmitOutcome::Updated(returned_id)
                    },
                };
                Ok(outcome)
            },
        }
    }

    pub fn apply_list(&mut self, tasks: Vec<Task>) {
        self.store.replace_all(tasks);
    }

    pub fn apply_updated(&mut self, id: &TaskId, task: Task) {
        self.store.replace(id, task);
    }

    pub fn apply_deleted(&mut self, id: &TaskId) {
        if self.store.remove(id).is_none() {
            log::debug!("Task {} was already gone from the store", id);
        }
    }
}


/// Send a form submission to a source
pub async fn send_submission<S>(source: &mut S, submission: &Submission) -> Result<Task>
where
    S: TaskSource + Send,
{
    match submission {
        Submission::Create(new_task) => source.create_task(new_task.clone()).await,
        Submission::Update(id, payload) => source.update_task(id, payload.clone()).await,
    }
}


/// An [`AppState`], kept in sync with a remote source.
///
/// The source is usually a [`Client`](crate::client::Client), but tests can use an in-memory `MockSource`. \
/// Every operation leaves the store untouched when its call fails. Failures are logged, and returned to the caller who may simply ignore them.
pub struct App<S: TaskSource> {
    source: S,
    state: AppState,
}

impl<S> App<S>
where
    S: TaskSource + Send,
{
    pub fn new(source: S) -> Self {
        Self { source, state: AppState::new() }
    }

    pub fn source(&self) -> &S               { &self.source }
    pub fn state(&self) -> &AppState         { &self.state  }
    pub fn state_mut(&mut self) -> &mut AppState { &mut self.state }

    /// Fetch every task, and replace the store content with them
    pub async fn load(&mut self) -> Result<()> {
        match self.source.list_tasks().await {
            Ok(tasks) => {
                self.state.apply_list(tasks);
                Ok(())
            },
            Err(err) => {
                log::warn!("Unable to fetch tasks, keeping the {} known ones: {}", self.state.store.len(), err);
                Err(err)
            },
        }
    }

    /// Submit the form, as a creation or an update depending on how it was opened.
    ///
    /// The form refuses other submissions until this future completes.
    /// In case it is dropped before completion, call [`AppState::cancel_form`] to make the form usable again.
    pub async fn submit_form(&mut self) -> Result<SubmitOutcome> {
        let submission = match self.state.begin_submit() {
            Ok(s) => s,
            Err(err) => {
                log::debug!("Form submission refused: {}", err);
                return Ok(SubmitOutcome::Rejected(err));
            },
        };
        let result = send_submission(&mut self.source, &submission).await;
        self.state.finish_submit(&submission, result)
    }

    /// Mark a task as completed, or back in progress.
    /// Returns false in case the task is unknown
    pub async fn toggle_status(&mut self, id: &TaskId) -> Result<bool> {
        let payload = match self.state.store.get(id) {
            None => {
                log::warn!("Cannot toggle task {}: it is not in the store", id);
                return Ok(false);
            },
            Some(task) => task.toggled_payload(),
        };

        match self.source.update_task(id, payload).await {
            Ok(task) => {
                log::info!("Task {} is now {}", id, task.status());
                self.state.apply_updated(id, task);
                Ok(true)
            },
            Err(err) => {
                log::warn!("Unable to toggle task {}: {}", id, err);
                Err(err)
            },
        }
    }

    /// Returns false in case the task is unknown
    pub async fn delete(&mut self, id: &TaskId) -> Result<bool> {
        if self.state.store.get(id).is_none() {
            log::warn!("Cannot delete task {}: it is not in the store", id);
            return Ok(false);
        }

        match self.source.delete_task(id).await {
            Ok(()) => {
                log::info!("Task {} deleted", id);
                self.state.apply_deleted(id);
                Ok(true)
            },
            Err(err) => {
                log::warn!("Unable to delete task {}: {}", id, err);
                Err(err)
            },
        }
    }
}
