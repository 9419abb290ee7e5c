//! HTTP surface: `/health` and `/incomes/{source}`.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use inflow_providers::{FetchResult, ProviderError, ProviderSet, Source};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;

use crate::error::ApiError;

pub struct AppState {
    pub providers: ProviderSet,
    pub default_days: u32,
}

/// Assemble the router. `frontend_origin` is the single browser origin
/// allowed by CORS; an unparseable origin disables cross-origin access
/// rather than failing startup.
pub fn build_router(state: Arc<AppState>, frontend_origin: &str) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_credentials(true);
    match frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => log::warn!("invalid frontend origin {frontend_origin:?}, CORS disabled"),
    }

    Router::new()
        .route("/health", get(health))
        .route("/incomes/{source}", get(incomes))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct IncomesQuery {
    days: Option<u32>,
}

async fn incomes(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
    Query(query): Query<IncomesQuery>,
) -> Result<Json<FetchResult>, ApiError> {
    let source = Source::parse(&source)
        .ok_or_else(|| ApiError::from(ProviderError::UnknownSource(source)))?;
    // days=0 means "use the default", matching the dashboard's behavior
    // when the field is cleared.
    let days = query.days.filter(|d| *d > 0).unwrap_or(state.default_days);

    // Dropping the handler future (client went away) cancels the token,
    // which abandons the in-flight provider call.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let result = state.providers.fetch_recent(source, days, &cancel).await?;
    log::info!(
        "[{source}] {} transactions over {days} days",
        result.transactions.len()
    );
    Ok(Json(result))
}
