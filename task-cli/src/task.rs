use serde::Serialize;

/// Body of `POST /tasks`.
#[derive(Debug, Eq, PartialEq, Serialize, Clone)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `PUT /tasks/{id}`. Only the fields that were given are sent.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Clone)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
