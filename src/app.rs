use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{auth, health, investments, summary, transactions};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/investment", investments::category_router())
        .nest("/api/investments", investments::router())
        .nest("/api/transaction", transactions::category_router())
        .nest("/api/transactions", transactions::router())
        .nest("/api/summary", summary::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
