//! To-do tasks, as exchanged with the remote task store

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{DateTime, Local, NaiveDateTime};

/// The format used to send datetimes to the server
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats accepted when reading a datetime without any offset.
/// The first one is what an HTML `datetime-local` input produces.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];


/// An opaque identifier, assigned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}


/// Whether a task is done
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns the other status
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::InProgress
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}


/// A to-do task, as the server knows it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    id: TaskId,

    title: String,
    #[serde(default)]
    description: String,

    /// When the task is due, in local time
    #[serde(with = "wire_datetime")]
    datetime: NaiveDateTime,

    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: TaskStatus,
}

impl Task {
    /// Create a Task instance. This is usually only useful for source implementations, as ids are assigned by the server
    pub fn new_with_parameters(id: TaskId, title: String, description: String,
                               datetime: NaiveDateTime, priority: Priority, status: TaskStatus) -> Self
    {
        Self { id, title, description, datetime, priority, status }
    }

    /// Build a task from a payload, once the server has given it an identifier
    pub fn from_new(id: TaskId, new: NewTask) -> Self {
        Self::new_with_parameters(id, new.title, new.description, new.datetime, new.priority, new.status)
    }

    pub fn id(&self) -> &TaskId            { &self.id          }
    pub fn title(&self) -> &str            { &self.title       }
    pub fn description(&self) -> &str      { &self.description }
    pub fn datetime(&self) -> &NaiveDateTime { &self.datetime  }
    pub fn priority(&self) -> Priority     { self.priority     }
    pub fn status(&self) -> TaskStatus     { self.status       }
    pub fn completed(&self) -> bool        { self.status.is_completed() }

    /// The full payload of this task, as sent in an update call
    pub fn to_payload(&self) -> NewTask {
        NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            datetime: self.datetime,
            priority: self.priority,
            status: self.status,
        }
    }

    /// The payload of an update call that only flips the status of this task
    pub fn toggled_payload(&self) -> NewTask {
        NewTask {
            status: self.status.toggled(),
            ..self.to_payload()
        }
    }
}


/// The content of a task, without its server-assigned identifier.
///
/// This is the body of create and update calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "wire_datetime")]
    pub datetime: NaiveDateTime,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// A payload for a brand new task, that is in progress
    pub fn new(title: String, description: String, datetime: NaiveDateTime, priority: Priority) -> Self {
        Self { title, description, datetime, priority, status: TaskStatus::InProgress }
    }
}


/// Parse a datetime the way the server or a `datetime-local` input may send it.
///
/// Datetimes carrying an offset are converted to local time, then the offset is dropped.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Used to support serde
mod wire_datetime {
    use super::*;

    pub fn serialize<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&datetime.format(WIRE_DATETIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_datetime(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime {:?}", s)))
    }
}
