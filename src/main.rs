use std::process::ExitCode;

use axum::extract::{DefaultBodyLimit, Request};
use axum::{Router, ServiceExt};
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;
use crate::endpoints::assignment;
use crate::store::{AppState, AssignmentStore};

mod config;
mod endpoints;
mod error;
mod extract;
mod middleware;
mod model;
mod store;


type App = NormalizePath<Router>;

/// Builds the application around a store
fn app(state: AppState, config: &Config) -> App {
    let app = Router::new()
        .route(
            "/api/assignments",
            post(assignment::create_assignment)
                .get(assignment::list_assignments)
                .delete(assignment::delete_all_assignments),
        )
        .route(
            "/api/assignments/{id}",
            get(assignment::get_assignment)
                .put(assignment::update_assignment)
                .delete(assignment::delete_assignment),
        )
        .route(
            "/api/assignments/{id}/submit",
            post(assignment::submit_assignment),
        )
        .route(
            "/api/assignments/{id}/status",
            put(assignment::update_status),
        )
        .fallback(endpoints::route_not_found)
        .method_not_allowed_fallback(endpoints::route_not_found)
        .with_state(state);

    // Each layer acts as a layer of an onion, with the ones added first
    // acting as the centre of the onion, and the ones added last acting
    // as the outer layers. The logger sits outside the error injector so
    // forced errors are logged with their final status.
    let app = app
        .layer(from_fn(middleware::inject_error))
        .layer(from_fn(middleware::log_request))
        .layer(DefaultBodyLimit::max(config.body_limit));

    let app = if config.cors {
        // Allow the verbs the API uses from any origin, with a JSON content-type
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE])
            .allow_origin(AllowOrigin::any());
        app.layer(cors)
    } else {
        app
    };

    // Trailing slashes are trimmed before routing, so `/api/assignments/` matches too
    NormalizePath::trim_trailing_slash(app)
}

fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Could not install the log subscriber: {e}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(Level::INFO);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let level = match config.level() {
        Ok(level) => level,
        Err(e) => {
            init_logging(Level::INFO);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Begin logging
    init_logging(level);

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // The store lives for as long as the process does
    let state = AppState::new(AssignmentStore::new());
    let app = app(state, &config);

    info!("Assignment API server running on http://{addr}");

    if let Err(e) = axum_server::bind(addr)
        .serve(ServiceExt::<Request>::into_make_service(app))
        .await
    {
        error!("Server stopped: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
