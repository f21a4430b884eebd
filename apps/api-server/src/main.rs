//! api-server — HTTP front end for the Tech Day catalog.
//!
//! Serves the event metadata, schedule and speaker directory as a JSON API
//! under `/api` and as a server-rendered page at `/`. Both accept an optional
//! `q` query parameter that filters talks and speakers case-insensitively.
//!
//! - Data: the built-in Tech Day fixture, or a JSON file via FIXTURE_PATH.
//! - CORS: Configurable via CORS_ALLOW_ORIGIN (origin string) for external frontends.
//! - Static assets: served from STATIC_DIR under `/static`.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p api-server
//!
//! # JSON logs with a custom catalog
//! LOG_FORMAT=json FIXTURE_PATH=./catalog.json cargo run -p api-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.
//!

mod config;
mod page;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use axum::http::HeaderValue;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain::adapters::fixture_repo::{FixtureFile, FixtureRepo};
use domain::service::CatalogService;
use domain::{CatalogRepository, CoreError};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_NAME: &str = "backend-api";

#[derive(Clone)]
struct AppState {
    catalog: Arc<CatalogService<FixtureRepo>>,
    started_at: SystemTime,
}

impl AppState {
    fn new(repo: FixtureRepo) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(repo)),
            started_at: SystemTime::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);
    cfg.warn_if_unusual();

    let repo = match load_fixture(&cfg.fixture) {
        Ok(r) => r,
        Err(e) => {
            error!(source = %cfg.fixture, err = %e, "failed to load fixture");
            std::process::exit(1);
        }
    };
    for (talk_id, key) in repo.dangling_references() {
        warn!(talk = %talk_id, speaker = %key, "talk references unknown speaker");
    }
    info!(
        source = %cfg.fixture,
        talks = repo.all_talks().len(),
        "catalog loaded"
    );

    let state = AppState::new(repo);

    // Request ID header name
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");

    let mut app = routes(state, &cfg.static_dir)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

    // CORS - already validated in Config::from_env()
    let cors = if cfg.cors_allow_origin == HeaderValue::from_static("*") {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([cfg.cors_allow_origin]))
            .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };
    app = app.layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(%addr, "api-server listening");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, err = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!(err = %e, "server error");
        std::process::exit(1);
    }
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

/// Build the catalog store from the configured source.
fn load_fixture(source: &config::FixtureSource) -> Result<FixtureRepo, CoreError> {
    match source {
        config::FixtureSource::BuiltIn => Ok(FixtureRepo::tech_day()),
        config::FixtureSource::File(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                CoreError::InvalidFixture(format!("{}: {}", path.display(), e))
            })?;
            let file: FixtureFile = serde_json::from_str(&raw).map_err(|e| {
                CoreError::InvalidFixture(format!("{}: {}", path.display(), e))
            })?;
            FixtureRepo::try_from(file)
                .map_err(|e| CoreError::InvalidFixture(format!("{}: {}", path.display(), e)))
        }
    }
}

fn routes(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/event", get(get_event))
        .route("/api/schedule", get(get_schedule))
        .route("/api/speakers", get(get_speakers))
        .route("/api/health", get(health))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

async fn get_event(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.event_info())
}

/// Map a query-string rejection (e.g. `q` given twice) to the JSON 400 body.
fn bad_query(rej: QueryRejection) -> Response {
    warn!(err = %rej, "bad query string");
    (
        StatusCode::BAD_REQUEST,
        Json(http_common::json_err("bad_request")),
    )
        .into_response()
}

async fn get_schedule(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(q) => q,
        Err(rej) => return bad_query(rej),
    };
    let schedule = state.catalog.filter_schedule(params.q.as_deref());
    debug!(query = ?params.q, count = schedule.len(), "schedule");
    Json(schedule).into_response()
}

async fn get_speakers(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(q) => q,
        Err(rej) => return bad_query(rej),
    };
    let speakers = state.catalog.filter_speakers(params.q.as_deref());
    debug!(query = ?params.q, count = speakers.len(), "speakers");
    Json(speakers).into_response()
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(http_common::health_body(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        state.started_at,
    ))
}

async fn index(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(q) => q,
        Err(rej) => return bad_query(rej),
    };
    let search = state.catalog.search(params.q.as_deref());
    debug!(
        query = %search.query,
        talks = search.schedule.len(),
        speakers = search.speakers.len(),
        "index"
    );
    Html(page::render_index(&search)).into_response()
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(http_common::json_err("not_found")),
    )
}
