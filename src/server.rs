use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::budget::BudgetGuard;
use crate::config::Config;
use crate::database::Db;
use crate::notifier::EmailDispatcher;
use crate::{categories, expenses};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub budget: BudgetGuard,
}

impl AppState {
    pub fn new(db: Db, config: &Config) -> Self {
        let dispatcher = Arc::new(EmailDispatcher::new(config.email.clone()));
        Self {
            db,
            budget: BudgetGuard::new(config.budget_limit, dispatcher),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(
            "/api/categories",
            get(categories::get_categories).post(categories::create_category),
        )
        .route(
            "/api/expenses",
            get(expenses::get_expenses).post(expenses::create_expense),
        )
        .route("/api/expenses/summary", get(expenses::get_summary))
        .route("/api/expenses/{id}", delete(expenses::delete_expense))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Expense Tracker API is running"
}

pub async fn run_with_listener(
    state: AppState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: AppState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
