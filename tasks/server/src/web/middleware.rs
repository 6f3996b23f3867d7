use crate::web::response::JsonResponse;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::IntoResponse;
use tower::layer::util::Stack;
use tower_http::set_header::SetResponseHeaderLayer;

const ALLOWED_ORIGIN: &str = "*";
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

type SetHeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Layer that sets the permissive Access-Control-Allow-* headers on every
/// response.
pub type CorsHeadersLayer = Stack<SetHeaderLayer, Stack<SetHeaderLayer, SetHeaderLayer>>;

/// Creates the [`CorsHeadersLayer`].
pub fn cors_headers_layer() -> CorsHeadersLayer {
    Stack::new(
        overriding(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        Stack::new(
            overriding(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            overriding(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN),
        ),
    )
}

fn overriding(name: HeaderName, value: &'static str) -> SetHeaderLayer {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// Answers pre-flight `OPTIONS` requests on any path with `204 No Content`
/// without routing them further.
pub async fn preflight_middleware(request: Request, next: Next) -> axum::response::Response {
    if request.method() == Method::OPTIONS {
        return JsonResponse::no_content().into_response();
    }
    next.run(request).await
}
