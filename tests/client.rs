//! Tests of the HTTP client, against a local server that answers canned responses

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use weekly_tasks::client::Client;
use weekly_tasks::traits::TaskSource;
use weekly_tasks::{parse_datetime, Error, NewTask, Priority, TaskId, TaskStatus};

/// What the server received
#[derive(Debug)]
struct ReceivedRequest {
    method: String,
    path: String,
    body: String,
}

/// Start a server that answers a single request with `status` and a JSON `body`.
/// Returns its base URL, and a handle that resolves to the request it received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<ReceivedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the end of the headers");
            raw.extend_from_slice(&chunk[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let headers = String::from_utf8_lossy(&raw[..header_end]).to_string();
        let content_length = headers.lines()
            .filter_map(|line| {
                let (name, value) = line.split_at(line.find(':')?);
                if name.eq_ignore_ascii_case("content-length") {
                    value[1..].trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .next()
            .unwrap_or(0);
        while raw.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before the end of the body");
            raw.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status, body.len(), body);
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        let request_line = headers.lines().next().unwrap_or_default().to_string();
        let mut parts = request_line.split_whitespace();
        ReceivedRequest {
            method: parts.next().unwrap_or_default().to_string(),
            path: parts.next().unwrap_or_default().to_string(),
            body: String::from_utf8_lossy(&raw[header_end..header_end + content_length]).to_string(),
        }
    });

    (url, handle)
}

/// A client for the local server, that never goes through a proxy
fn local_client(url: &str) -> Client {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    Client::with_http_client(url, http).unwrap()
}

fn new_task() -> NewTask {
    NewTask::new("Buy milk".to_string(), String::new(),
        parse_datetime("2024-03-04T09:00").unwrap(), Priority::Medium)
}


#[tokio::test]
async fn list_decodes_server_tasks() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("200 OK", r#"[
        {"_id":"65f0a1","title":"Standup","description":"daily","datetime":"2024-03-04T09:00","priority":"High","status":"completed","__v":0},
        {"_id":"65f0a2","title":"Retro","datetime":"2024-03-08T17:00:00","priority":"Low","status":"in-progress"}
    ]"#).await;

    let client = local_client(&url);
    let tasks = client.list_tasks().await.unwrap();

    let request = server.await.unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/tasks");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id(), &TaskId::from("65f0a1"));
    assert_eq!(tasks[0].title(), "Standup");
    assert_eq!(tasks[0].priority(), Priority::High);
    assert!(tasks[0].completed());
    assert_eq!(tasks[1].id().as_str(), "65f0a2");
    assert_eq!(tasks[1].description(), "");
    assert_eq!(tasks[1].status(), TaskStatus::InProgress);
    assert_eq!(tasks[1].datetime(), &parse_datetime("2024-03-08T17:00").unwrap());
}

#[tokio::test]
async fn create_posts_an_in_progress_task() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("201 Created",
        r#"{"_id":"new-id","title":"Buy milk","description":"","datetime":"2024-03-04T09:00:00","priority":"Medium","status":"in-progress"}"#).await;

    let mut client = local_client(&url);
    let created = client.create_task(new_task()).await.unwrap();

    let request = server.await.unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/tasks");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent["status"], "in-progress");
    assert_eq!(sent["title"], "Buy milk");
    assert_eq!(sent["priority"], "Medium");

    assert_eq!(created.id().as_str(), "new-id");
}

#[tokio::test]
async fn update_puts_to_the_task_path() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("200 OK",
        r#"{"_id":"65f0a1","title":"Buy milk","datetime":"2024-03-04T09:00","priority":"Medium","status":"completed"}"#).await;

    let mut client = local_client(&url);
    let mut payload = new_task();
    payload.status = TaskStatus::Completed;
    let updated = client.update_task(&TaskId::from("65f0a1"), payload).await.unwrap();

    let request = server.await.unwrap();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/tasks/65f0a1");
    let sent: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent["status"], "completed");

    assert!(updated.completed());
}

#[tokio::test]
async fn delete_hits_the_task_path() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("204 No Content", "").await;

    let mut client = local_client(&url);
    client.delete_task(&TaskId::from("65f0a1")).await.unwrap();

    let request = server.await.unwrap();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/tasks/65f0a1");
}

#[tokio::test]
async fn server_errors_are_reported() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let client = local_client(&url);
    let result = client.list_tasks().await;
    server.await.unwrap();

    match result {
        Err(Error::UnexpectedStatus { status, url }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(url.path(), "/tasks");
        },
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn failed_delete_is_reported() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (url, server) = serve_once("404 Not Found", r#"{"error":"not found"}"#).await;

    let mut client = local_client(&url);
    let result = client.delete_task(&TaskId::from("gone")).await;
    server.await.unwrap();

    assert!(matches!(result, Err(Error::UnexpectedStatus { .. })));
}
