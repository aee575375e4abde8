use chrono::NaiveDate;
use sqlx::PgPool;
use crate::models::CategoryTotal;

/// Per-category totals for transactions whose calendar date falls in `[from, to]`.
pub async fn fetch_category_totals(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<CategoryTotal>, sqlx::Error> {
    sqlx::query_as::<_, CategoryTotal>(
        "SELECT c.id AS category_id, c.name AS category_name, c.type, SUM(t.amount) AS total
         FROM transactions t
         JOIN transaction_categories c ON c.id = t.category_id
         WHERE t.created_at::date BETWEEN $1 AND $2
         GROUP BY c.id, c.name, c.type
         ORDER BY c.type ASC, total DESC, c.id ASC"
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}
