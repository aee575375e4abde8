use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::{CategoryTotal, EntryType, Summary};
use crate::utils::dates;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Missing bounds default to the month containing `to` (itself defaulting to `today`).
pub fn resolve_range(params: &SummaryParams, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
    let to = params.to.unwrap_or(today);
    let from = params.from.unwrap_or_else(|| dates::month_start(to));
    if from > to {
        return Err(AppError::Validation("invalid_range"));
    }
    Ok((from, to))
}

pub fn build_summary(from: NaiveDate, to: NaiveDate, by_category: Vec<CategoryTotal>) -> Summary {
    let mut total_in = BigDecimal::from(0);
    let mut total_out = BigDecimal::from(0);

    for row in &by_category {
        match row.kind {
            EntryType::In => total_in += &row.total,
            EntryType::Out => total_out += &row.total,
        }
    }

    let balance = &total_in - &total_out;
    let days = dates::days_between(dates::start_of_day(from), dates::start_of_day(to)) + 1;

    Summary {
        from,
        to,
        days,
        total_in,
        total_out,
        balance,
        by_category,
    }
}

pub async fn summarize(pool: &PgPool, params: SummaryParams) -> Result<Summary, AppError> {
    let (from, to) = resolve_range(&params, dates::today())?;
    let rows = db::summary_queries::fetch_category_totals(pool, from, to)
        .await
        .map_err(AppError::db("failed_to_fetch_summary"))?;
    Ok(build_summary(from, to, rows))
}
