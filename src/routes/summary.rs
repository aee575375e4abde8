use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::extract::ApiQuery;
use crate::models::{DataEnvelope, Summary};
use crate::services::summary_service::{self, SummaryParams};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_summary))
}

pub async fn get_summary(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> Result<Json<DataEnvelope<Summary>>, AppError> {
    info!("GET /api/summary - Building summary {:?}", params);
    let summary = summary_service::summarize(&state.pool, params)
        .await
        .map_err(|e| {
            error!("Failed to build summary: {}", e);
            e
        })?;
    info!(
        "Summary {}..{}: in={} out={} across {} categories",
        summary.from,
        summary.to,
        summary.total_in,
        summary.total_out,
        summary.by_category.len()
    );
    Ok(Json(DataEnvelope::new(summary)))
}
