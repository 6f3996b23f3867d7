//! Validation of inbound task payloads and identifiers.
//!
//! Request bodies arrive as a loosely typed JSON object. The functions here
//! check key presence and value kinds and turn the payload into a typed
//! [`NewTask`] or [`TaskChanges`]. They have no side effects.

use crate::task::{NewTask, TaskChanges, TaskId, TaskStatus};
use serde_json::{Map, Value};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// A decoded JSON request body.
pub type Payload = Map<String, Value>;

/// A human-readable reason why a request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Decodes a raw request body into a [`Payload`].
///
/// An empty body decodes to an empty payload so that the operation-specific
/// validation can report it.
pub fn parse_payload(body: &[u8]) -> Result<Payload, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(_) => Err(ValidationError::new("Request body must be a JSON object")),
        Err(_) => Err(ValidationError::new("Request body is not valid JSON")),
    }
}

/// Validates the payload of a create request.
pub fn validate_create(payload: &Payload) -> Result<NewTask, ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::new("Request body is empty"));
    }

    let title = match payload.get("title") {
        Some(value) => validate_title(value)?,
        None => return Err(ValidationError::new("Field 'title' is required")),
    };

    let description = match payload.get("description") {
        Some(value) => validate_description(value)?,
        None => None,
    };

    let status = match payload.get("status") {
        None | Some(Value::Null) => TaskStatus::default(),
        Some(Value::String(status)) if status.is_empty() => TaskStatus::default(),
        Some(value) => validate_status(value)?,
    };

    Ok(NewTask {
        title,
        description,
        status,
    })
}

/// Validates the payload of an update request.
///
/// At least one of `title`, `description` or `status` must be present.
/// Other keys are ignored.
pub fn validate_update(payload: &Payload) -> Result<TaskChanges, ValidationError> {
    if payload.is_empty() {
        return Err(ValidationError::new("Request body is empty"));
    }

    let changes = TaskChanges {
        title: payload.get("title").map(validate_title).transpose()?,
        description: payload
            .get("description")
            .map(validate_description)
            .transpose()?,
        status: payload.get("status").map(validate_status).transpose()?,
    };

    if changes.is_empty() {
        return Err(ValidationError::new(
            "No valid fields to update (title, description, status)",
        ));
    }
    Ok(changes)
}

/// Validates a task identifier taken from a request path.
pub fn validate_id(value: &str) -> Result<TaskId, ValidationError> {
    match value.parse::<TaskId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::new("Invalid ID")),
    }
}

fn validate_title(value: &Value) -> Result<String, ValidationError> {
    let title = match value {
        Value::String(title) => title,
        Value::Null => return Err(ValidationError::new("Field 'title' cannot be empty")),
        _ => return Err(ValidationError::new("Field 'title' must be a string")),
    };
    if title.trim().is_empty() {
        return Err(ValidationError::new("Field 'title' cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::new(format!(
            "Field 'title' must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.clone())
}

fn validate_description(value: &Value) -> Result<Option<String>, ValidationError> {
    let description = match value {
        Value::String(description) => description,
        Value::Null => return Ok(None),
        _ => return Err(ValidationError::new("Field 'description' must be a string")),
    };
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new(format!(
            "Field 'description' must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(Some(description.clone()))
}

fn validate_status(value: &Value) -> Result<TaskStatus, ValidationError> {
    value
        .as_str()
        .and_then(|status| status.parse().ok())
        .ok_or_else(|| {
            let accepted: Vec<&str> = TaskStatus::ALL.iter().map(TaskStatus::as_str).collect();
            ValidationError::new(format!("Invalid status. Use: {}", accepted.join(", ")))
        })
}
