use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use connect4::{best_move, MoveRequest};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    let addr = config.addr;
    let app = app_router(config);

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn app_router(config: Config) -> Router {
    let spa = ServeDir::new(&config.static_dir).append_index_html_on_directories(true);
    let api = Router::new()
        .route("/move", get(handle_move))
        .route("/health", get(|| async { "ok" }))
        .with_state(Arc::new(config));
    Router::new()
        .nest("/api", api)
        .fallback_service(spa)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, serde::Deserialize)]
struct MoveQuery {
    #[serde(default)]
    position: String,
    level: Option<usize>,
}

async fn handle_move(
    State(config): State<Arc<Config>>,
    Query(query): Query<MoveQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let req = MoveRequest {
        position: query.position,
        level: query.level.unwrap_or(config.depth),
    };
    let position = req.position.clone();
    let level = req.level;
    let mv = tokio::task::spawn_blocking(move || best_move(req)).await??;
    info!(
        %position,
        level,
        column = mv.column,
        score = mv.score,
        outcome = ?mv.outcome,
        "computer moved"
    );
    if !config.think_delay.is_zero() {
        tokio::time::sleep(config.think_delay).await;
    }
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
