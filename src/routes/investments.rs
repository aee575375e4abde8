use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::db::{investment_category_queries, investment_queries};
use crate::errors::AppError;
use crate::models::{DataEnvelope, Investment, InvestmentCategory};
use crate::state::AppState;

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_investments))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<InvestmentCategory>>>, AppError> {
    info!("GET /api/investment/categories - Fetching investment categories");
    let categories = investment_category_queries::fetch_all(&state.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch investment categories: {}", e);
            AppError::db("failed_to_fetch_categories")(e)
        })?;
    Ok(Json(DataEnvelope::new(categories)))
}

pub async fn list_investments(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<Vec<Investment>>>, AppError> {
    info!("GET /api/investments - Fetching investments");
    let investments = investment_queries::fetch_all(&state.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch investments: {}", e);
            AppError::db("failed_to_fetch_investments")(e)
        })?;
    info!("Fetched {} investments", investments.len());
    Ok(Json(DataEnvelope::new(investments)))
}
