use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A JSON response with an explicit status code.
///
/// The body is written as UTF-8 without escaping non-ASCII characters.
/// No body is written for `204 No Content` or when the body is absent.
#[derive(Debug)]
pub struct JsonResponse<T = Value> {
    status: StatusCode,
    body: Option<T>,
}

impl<T> JsonResponse<T> {
    pub fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// `200 OK` with `body`.
    pub fn ok(body: T) -> Self {
        Self::new(StatusCode::OK, Some(body))
    }

    /// `201 Created` with `body`.
    pub fn created(body: T) -> Self {
        Self::new(StatusCode::CREATED, Some(body))
    }
}

impl JsonResponse {
    /// `204 No Content`.
    pub fn no_content() -> Self {
        Self::new(StatusCode::NO_CONTENT, None)
    }
}

impl JsonResponse<ErrorBody> {
    /// An error response of the form `{"error": "<message>"}`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(
            status,
            Some(ErrorBody {
                error: message.into(),
            }),
        )
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let mut response = match self.body {
            Some(body) if self.status != StatusCode::NO_CONTENT => {
                match serde_json::to_vec(&body) {
                    Ok(bytes) => (self.status, bytes).into_response(),
                    Err(err) => {
                        tracing::error!("Failed to serialize response body: {}", err);
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                }
            }
            _ => self.status.into_response(),
        };
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        response
    }
}

/// Response for any method and path outside the route table.
pub fn route_not_found() -> JsonResponse<ErrorBody> {
    JsonResponse::error(StatusCode::NOT_FOUND, "Route not found")
}
