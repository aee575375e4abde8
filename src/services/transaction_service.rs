use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::warn;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateTransaction, EntryType, Transaction, TransactionFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedFilter {
    pub kind: Option<EntryType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub fn resolve_filter(filter: TransactionFilter) -> Result<ResolvedFilter, AppError> {
    let kind = match filter.kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<EntryType>().map_err(|e| {
            warn!("Rejecting transaction filter: {}", e);
            AppError::Validation("invalid_type")
        })?),
    };

    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(AppError::Validation("invalid_range"));
        }
    }

    Ok(ResolvedFilter { kind, from: filter.from, to: filter.to })
}

/// Amounts are stored as `NUMERIC(18, 2)`; anything at or above this
/// does not fit.
const AMOUNT_LIMIT: i64 = 10_000_000_000_000_000;

/// Checks the amount at cent precision, the way the column will store it.
pub fn validate_new(input: &CreateTransaction) -> Result<(), AppError> {
    let cents = input.amount.round(2);
    if cents <= BigDecimal::from(0) || cents >= BigDecimal::from(AMOUNT_LIMIT) {
        warn!("Rejecting transaction amount {}", input.amount);
        return Err(AppError::Validation("invalid_amount"));
    }
    Ok(())
}

pub async fn fetch_filtered(
    pool: &PgPool,
    filter: TransactionFilter,
) -> Result<Vec<Transaction>, AppError> {
    let filter = resolve_filter(filter)?;
    let transactions = db::transaction_queries::fetch_filtered(pool, filter.kind, filter.from, filter.to)
        .await
        .map_err(AppError::db("failed_to_fetch_transactions"))?;
    Ok(transactions)
}

pub async fn create(pool: &PgPool, input: CreateTransaction) -> Result<Transaction, AppError> {
    validate_new(&input)?;
    db::transaction_queries::create(pool, &input)
        .await
        .map_err(AppError::db("failed_to_create_transaction"))?
        .ok_or_else(|| {
            warn!("Category {} does not exist with type {}", input.category_id, input.kind);
            AppError::Validation("invalid_category")
        })
}
