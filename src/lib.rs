//! This crate provides a client for a remote to-do list, that organizes tasks by calendar week.
//!
//! It provides an HTTP client in the [`client`] module, that can be used as a stand-alone module.
//! Any other remote store can be plugged in, as long as it implements [`TaskSource`](traits::TaskSource).
//!
//! The data the server returned last is mirrored locally in a [`TaskStore`](store::TaskStore). \
//! An [`App`](app::App) keeps this store in sync with a source, and exposes what an interface displays:
//! tasks matching a [search](search), grouped into [weeks](week) with their progress, and an add/edit [form].

pub mod traits;
pub mod error;
pub use error::Error;

mod task;
pub use task::{Task, TaskId, NewTask, Priority, TaskStatus, parse_datetime};
pub mod store;
pub mod week;
pub mod search;
pub mod form;
pub mod app;
pub use app::App;

pub mod client;
#[cfg(any(test, feature = "local_source_mocks_remote_store"))]
pub mod mock_behaviour;
#[cfg(any(test, feature = "local_source_mocks_remote_store"))]
pub mod mock_source;

pub mod config;
pub mod utils;
