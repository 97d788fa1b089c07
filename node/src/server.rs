// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::extract::{Path, Query, Request as AxumRequest, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::api::{HistoryParams, SentBurn, SentMint, SentTransfer};
use crate::errors::ApiError;
use mercury_ledger::event::Event;
use mercury_ledger::ledger::Ledger;
use mercury_ledger::types::{now_millis, readable, Currency};

/// The ledger is the shared mutable state: mutating handlers take the
/// write lock (one validate->append->apply critical section at a time),
/// read handlers take a read lock for a consistent snapshot.
pub type SharedLedger = Arc<RwLock<Ledger>>;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

async fn auth_guard(
    State(token): State<Arc<Option<String>>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(token_str) = &*token {
        let auth_header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|val| val.to_str().ok())
            .filter(|val| val.starts_with("Bearer "));

        if let Some(val) = auth_header {
            let provided = val.trim_start_matches("Bearer ");
            if provided == token_str {
                return Ok(next.run(req).await);
            }
        }
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}

pub fn build_router(state: SharedLedger, auth_token: Option<String>) -> Router {
    let mut app = Router::new()
        .route("/currentFee", get(current_fee))
        .route("/currentStipend", get(current_stipend))
        .route("/balance/:id", get(balance))
        .route("/transactions", get(all_transactions))
        .route("/transactions/:id", get(user_transactions))
        .route("/transact", post(transact))
        .route("/mint", post(mint))
        .route("/burn", post(burn))
        .route("/stipend/:id", post(stipend))
        // Observability
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        let auth_state = Arc::new(Some(token));
        app = app.layer(from_fn_with_state(auth_state, auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    app
}

async fn current_fee(State(state): State<SharedLedger>) -> Json<f64> {
    let ledger = state.read().await;
    Json(ledger.current_fee())
}

async fn current_stipend(State(state): State<SharedLedger>) -> Json<Currency> {
    let ledger = state.read().await;
    Json(ledger.current_stipend())
}

async fn balance(State(state): State<SharedLedger>, Path(id): Path<String>) -> Json<Currency> {
    let ledger = state.read().await;
    Json(ledger.balance(&id))
}

async fn all_transactions(
    State(state): State<SharedLedger>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let ledger = state.read().await;
    Ok(Json(ledger.recent(limit)?))
}

async fn user_transactions(
    State(state): State<SharedLedger>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let ledger = state.read().await;
    Ok(Json(ledger.recent_for_user(&id, limit)?))
}

async fn transact(
    State(state): State<SharedLedger>,
    Json(sent): Json<SentTransfer>,
) -> Result<Json<Event>, ApiError> {
    let summary = format!("{} -[{}]-> {}", sent.from, readable(sent.amount), sent.to);

    let start = std::time::Instant::now();
    let mut ledger = state.write().await;
    let event = ledger.transfer(sent)?;
    drop(ledger);

    metrics::increment_counter!("mercury_events_committed_total", "kind" => "transaction");
    metrics::histogram!(
        "mercury_event_commit_duration_seconds",
        start.elapsed().as_secs_f64()
    );
    tracing::info!("Transaction successful  {}", summary);
    Ok(Json(event))
}

async fn mint(
    State(state): State<SharedLedger>,
    Json(sent): Json<SentMint>,
) -> Result<Json<Event>, ApiError> {
    let summary = format!("{} <-[{}]-", sent.to, readable(sent.amount));

    let start = std::time::Instant::now();
    let mut ledger = state.write().await;
    let event = ledger.mint(sent, now_millis())?;
    drop(ledger);

    metrics::increment_counter!("mercury_events_committed_total", "kind" => "mint");
    metrics::histogram!(
        "mercury_event_commit_duration_seconds",
        start.elapsed().as_secs_f64()
    );
    tracing::info!("Mint successful         {}", summary);
    Ok(Json(event))
}

async fn burn(
    State(state): State<SharedLedger>,
    Json(sent): Json<SentBurn>,
) -> Result<Json<Event>, ApiError> {
    let summary = format!("{} -[{}]->", sent.from, readable(sent.amount));

    let start = std::time::Instant::now();
    let mut ledger = state.write().await;
    let event = ledger.burn(sent)?;
    drop(ledger);

    metrics::increment_counter!("mercury_events_committed_total", "kind" => "burn");
    metrics::histogram!(
        "mercury_event_commit_duration_seconds",
        start.elapsed().as_secs_f64()
    );
    tracing::info!("Burn successful         {}", summary);
    Ok(Json(event))
}

async fn stipend(
    State(state): State<SharedLedger>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    let start = std::time::Instant::now();
    let mut ledger = state.write().await;
    let event = ledger.request_stipend(&id)?;
    drop(ledger);

    metrics::increment_counter!("mercury_events_committed_total", "kind" => "stipend");
    metrics::histogram!(
        "mercury_event_commit_duration_seconds",
        start.elapsed().as_secs_f64()
    );
    tracing::info!("Stipend successful      {}", id);
    Ok(Json(event))
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
