use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};

use crate::db::transaction_category_queries;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiQuery};
use crate::models::{CategoriesByType, CreateTransaction, DataEnvelope, Transaction, TransactionFilter};
use crate::services::transaction_service;
use crate::state::AppState;

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<DataEnvelope<CategoriesByType>>, AppError> {
    info!("GET /api/transaction/categories - Fetching transaction categories");
    let categories = transaction_category_queries::fetch_all(&state.pool)
        .await
        .map_err(|e| {
            error!("Failed to fetch transaction categories: {}", e);
            AppError::db("failed_to_fetch_categories")(e)
        })?;
    Ok(Json(DataEnvelope::new(CategoriesByType::group(categories))))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TransactionFilter>,
) -> Result<Json<DataEnvelope<Vec<Transaction>>>, AppError> {
    info!("GET /api/transactions - Listing transactions {:?}", filter);
    let transactions = transaction_service::fetch_filtered(&state.pool, filter)
        .await
        .map_err(|e| {
            error!("Failed to list transactions: {}", e);
            e
        })?;
    Ok(Json(DataEnvelope::new(transactions)))
}

pub async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateTransaction>,
) -> Result<(StatusCode, Json<DataEnvelope<Transaction>>), AppError> {
    info!("POST /api/transactions - Creating {} transaction in category {}", data.kind, data.category_id);
    let transaction = transaction_service::create(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to create transaction: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(transaction))))
}

#[cfg(test)]
mod tests {
    use crate::app::testing::{get, send, unreachable_app};
    use axum::body::Body;
    use http::{header, Request, StatusCode};

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/transactions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_type_is_rejected_before_querying() {
        let (status, _, body) = send(unreachable_app(), get("/api/transactions?type=SIDEWAYS")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_type" }));
    }

    #[tokio::test]
    async fn test_reversed_range_is_rejected() {
        let (status, _, body) =
            send(unreachable_app(), get("/api/transactions?from=2024-05-02&to=2024-05-01")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_range" }));
    }

    #[tokio::test]
    async fn test_malformed_date_uses_error_envelope() {
        let (status, _, body) = send(unreachable_app(), get("/api/transactions?from=yesterday")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_request" }));
    }

    #[tokio::test]
    async fn test_create_with_unknown_type_uses_error_envelope() {
        let request = post_json(serde_json::json!({ "category_id": 1, "type": "SIDEWAYS", "amount": 1000 }));
        let (status, _, body) = send(unreachable_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_request" }));
    }

    #[tokio::test]
    async fn test_create_without_json_content_type_uses_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/transactions")
            .body(Body::from("category_id=1"))
            .unwrap();
        let (status, _, body) = send(unreachable_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_request" }));
    }

    #[tokio::test]
    async fn test_list_unreachable_database() {
        let (status, _, body) = send(unreachable_app(), get("/api/transactions?type=IN")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "failed_to_fetch_transactions" }));
    }

    #[tokio::test]
    async fn test_categories_unreachable_database() {
        let (status, _, body) = send(unreachable_app(), get("/api/transaction/categories")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "failed_to_fetch_categories" }));
    }

    #[tokio::test]
    async fn test_create_rejects_zero_amount() {
        let request = post_json(serde_json::json!({ "category_id": 1, "type": "OUT", "amount": 0 }));
        let (status, _, body) = send(unreachable_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid_amount" }));
    }

    #[tokio::test]
    async fn test_create_rejects_amounts_the_column_cannot_hold() {
        for amount in ["0.001", "10000000000000000"] {
            let request = post_json(serde_json::json!({ "category_id": 1, "type": "OUT", "amount": amount }));
            let (status, _, body) = send(unreachable_app(), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, serde_json::json!({ "error": "invalid_amount" }));
        }
    }

    #[tokio::test]
    async fn test_create_unreachable_database() {
        let request = post_json(serde_json::json!({
            "category_id": 1,
            "type": "OUT",
            "amount": "45000.50",
            "description": "Groceries"
        }));
        let (status, _, body) = send(unreachable_app(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "failed_to_create_transaction" }));
    }
}
