//! Client for the task management HTTP API.

mod task;

pub use task::{CreateTaskRequest, UpdateTaskRequest};

pub const DEFAULT_URL: &str = "http://localhost:8000";

/// Errors raised while talking to the server.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Status code and raw body of a server response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Renders the response for the terminal.
    ///
    /// JSON bodies are pretty-printed below an `HTTP <code>` line with
    /// non-ASCII characters left as is. Anything else, including an empty
    /// body, is printed on a single `HTTP <code> - <body>` line.
    pub fn render(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(json) => {
                let pretty = serde_json::to_string_pretty(&json).unwrap_or_else(|_| self.body.clone());
                format!("HTTP {}\n{}", self.status, pretty)
            }
            Err(_) => format!("HTTP {} - {}", self.status, self.body),
        }
    }
}

/// Issues task requests against a running server.
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `GET /tasks`
    pub async fn list(&self) -> Result<ApiResponse, ClientError> {
        self.send(self.http.get(self.url("/tasks"))).await
    }

    /// `POST /tasks`
    pub async fn create(&self, request: &CreateTaskRequest) -> Result<ApiResponse, ClientError> {
        self.send(self.http.post(self.url("/tasks")).json(request))
            .await
    }

    /// `GET /tasks/{id}`
    pub async fn get(&self, id: i64) -> Result<ApiResponse, ClientError> {
        self.send(self.http.get(self.task_url(id))).await
    }

    /// `PUT /tasks/{id}`
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTaskRequest,
    ) -> Result<ApiResponse, ClientError> {
        self.send(self.http.put(self.task_url(id)).json(request))
            .await
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete(&self, id: i64) -> Result<ApiResponse, ClientError> {
        self.send(self.http.delete(self.task_url(id))).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn task_url(&self, id: i64) -> String {
        self.url(&format!("/tasks/{id}"))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse, ClientError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
