use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::EntryType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryTotal {
    pub category_id: i32,
    pub category_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntryType,
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: i64,
    pub total_in: BigDecimal,
    pub total_out: BigDecimal,
    pub balance: BigDecimal,
    pub by_category: Vec<CategoryTotal>,
}
