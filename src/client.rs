//! This module provides a client to connect to the remote task store

use async_trait::async_trait;
use reqwest::Response;
use url::Url;

use crate::error::{Error, Result};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskSource;

/// The collection every endpoint lives in
const TASKS_PATH: &str = "tasks";


/// A [`TaskSource`] that fetches its data from the task store HTTP API
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self> {
        Self::with_http_client(url, reqwest::Client::new())
    }

    /// Create a client that sends its requests with a custom HTTP client (e.g. with timeouts or proxies set)
    pub fn with_http_client<S: AsRef<str>>(url: S, http: reqwest::Client) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self { url, http })
    }

    /// Create a client for the API URL from the [`config`](crate::config)
    pub fn from_config() -> Result<Self> {
        Self::new(crate::config::API_URL.as_str())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `{base}/tasks`, or `{base}/tasks/{id}`
    fn endpoint(&self, id: Option<&TaskId>) -> Result<Url> {
        let mut url = self.url.clone();
        {
            let mut segments = url.path_segments_mut()
                .map_err(|_| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty().push(TASKS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

/// Turns non-success HTTP statuses into errors
fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() == false {
        return Err(Error::UnexpectedStatus {
            status: response.status(),
            url: response.url().clone(),
        });
    }
    Ok(response)
}

#[async_trait]
impl TaskSource for Client {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.endpoint(None)?;
        log::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let tasks = check_status(response)?.json::<Vec<Task>>().await?;
        log::debug!("Server returned {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&mut self, new_task: NewTask) -> Result<Task> {
        let url = self.endpoint(None)?;
        log::debug!("POST {} ({:?})", url, new_task.title);

        let response = self.http.post(url).json(&new_task).send().await?;
        let task = check_status(response)?.json::<Task>().await?;
        Ok(task)
    }

    async fn update_task(&mut self, id: &TaskId, payload: NewTask) -> Result<Task> {
        let url = self.endpoint(Some(id))?;
        log::debug!("PUT {}", url);

        let response = self.http.put(url).json(&payload).send().await?;
        let task = check_status(response)?.json::<Task>().await?;
        Ok(task)
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<()> {
        let url = self.endpoint(Some(id))?;
        log::debug!("DELETE {}", url);

        let response = self.http.delete(url).send().await?;
        check_status(response)?;
        Ok(())
    }
}
