use axum::Router;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::api::v1::{TaskState, create_task_router};
use crate::task::controller::TaskController;
use crate::task::repository::{SeaOrmTaskRepository, TaskRepository};

pub mod middleware;
pub mod response;

use middleware::{cors_headers_layer, preflight_middleware};
use response::route_not_found;

/// Builds the application router on top of the given task storage.
pub fn create_app(repository: Arc<dyn TaskRepository>) -> Router {
    let task_state = TaskState {
        controller: TaskController::new(repository),
    };

    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(create_task_router(task_state))
        .fallback(route_not_found_handler)
        .method_not_allowed_fallback(route_not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_headers_layer())
                .layer(from_fn(preflight_middleware)),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Arc<Config>) -> anyhow::Result<()> {
    let repository = SeaOrmTaskRepository::connect(&config.database_url).await?;
    repository.init().await?;
    tracing::info!("Database ready at {}", config.database_url);

    let server_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let app = create_app(Arc::new(repository));
    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

/// Answers any method and path outside the route table with a JSON 404.
#[tracing::instrument]
pub async fn route_not_found_handler() -> axum::response::Response {
    route_not_found().into_response()
}
