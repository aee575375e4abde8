use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Direction of money movement. Stored as `'IN'` / `'OUT'` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
pub enum EntryType {
    In,
    Out,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::In => "IN",
            EntryType::Out => "OUT",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(EntryType::In),
            "OUT" => Ok(EntryType::Out),
            other => Err(format!("unknown entry type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: uuid::Uuid,
    pub category_id: i32,
    pub category_name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntryType,
    pub amount: BigDecimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransaction {
    pub category_id: i32,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub amount: BigDecimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TransactionCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: EntryType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesByType {
    #[serde(rename = "IN")]
    pub incoming: Vec<TransactionCategory>,
    #[serde(rename = "OUT")]
    pub outgoing: Vec<TransactionCategory>,
}

impl CategoriesByType {
    /// Splits an id-ordered category list by type, keeping the order.
    pub fn group(categories: Vec<TransactionCategory>) -> Self {
        let mut grouped = Self::default();
        for category in categories {
            match category.kind {
                EntryType::In => grouped.incoming.push(category),
                EntryType::Out => grouped.outgoing.push(category),
            }
        }
        grouped
    }
}

/// Query-string filter for listing transactions. Dates are inclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
