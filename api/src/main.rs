//! Polls API Server
//!
//! A small polling site: published questions, their choices, and a vote
//! counter per choice, plus an admin console for managing them.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod admin;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod pages;

#[cfg(test)]
mod test_utils;


use adapters::{create_schema, PostgresChoiceRepository, PostgresQuestionRepository};
use app::{AdminService, PollService};
use config::Config;
use pages::PageRenderer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub poll_service: Arc<PollService<PostgresQuestionRepository, PostgresChoiceRepository>>,
    pub admin_service: Arc<AdminService<PostgresQuestionRepository, PostgresChoiceRepository>>,
    pub pages: Arc<PageRenderer>,
    pub config: Config,
}

impl AppState {
    /// Wire repositories, services and templates over one connection pool
    pub fn new(db: DatabaseConnection, config: Config) -> anyhow::Result<Self> {
        let question_repo = Arc::new(PostgresQuestionRepository::new(db.clone()));
        let choice_repo = Arc::new(PostgresChoiceRepository::new(db));

        let poll_service = Arc::new(PollService::new(
            question_repo.clone(),
            choice_repo.clone(),
            config.index_page_size,
        ));
        let admin_service = Arc::new(AdminService::new(question_repo, choice_repo));
        let pages = Arc::new(PageRenderer::new().context("Failed to load templates")?);

        Ok(Self {
            poll_service,
            admin_service,
            pages,
            config,
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full router for the given state
pub fn build_router(state: AppState) -> Router {
    // Admin console (bearer token)
    let admin_routes = Router::new()
        .route("/admin/polls/", get(handlers::admin_index))
        .route(
            "/admin/polls/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route(
            "/admin/polls/questions/:id",
            get(handlers::get_question)
                .patch(handlers::update_question)
                .delete(handlers::delete_question),
        )
        .route(
            "/admin/polls/choices",
            get(handlers::list_choices).post(handlers::create_choice),
        )
        .route(
            "/admin/polls/choices/:id",
            get(handlers::get_choice)
                .patch(handlers::update_choice)
                .delete(handlers::delete_choice),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public poll pages
        .route("/polls/", get(handlers::index))
        .route("/polls/:question_id/", get(handlers::detail))
        .route("/polls/:question_id/vote/", post(handlers::vote))
        .route("/polls/:question_id/results/", get(handlers::results))
        .merge(admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,polls_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting polls API...");

    // Load configuration
    let config = Config::from_env()?;
    if !config.admin_enabled() {
        tracing::warn!("ADMIN_TOKEN is not set; the admin console will reject all requests");
    }

    // Connect to the database
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    create_schema(&db)
        .await
        .context("Failed to create database schema")?;
    tracing::info!("Database connected");

    let port = config.port;
    let app = build_router(AppState::new(db, config)?);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
