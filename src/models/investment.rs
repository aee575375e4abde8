use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Reference data seeded outside the app (e.g. "Stocks", "Bonds", "Gold").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InvestmentCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
}

// A single investment record with its category name joined in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Investment {
    pub id: uuid::Uuid,
    pub category_id: i32,
    pub category_name: String,
    pub amount: BigDecimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub description: String,
}
