use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use crate::models::{CreateTransaction, EntryType, Transaction};

pub async fn fetch_filtered(
    pool: &PgPool,
    kind: Option<EntryType>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<Transaction>, sqlx::Error> {
    sqlx::query_as::<_, Transaction>(
        "SELECT t.id, t.category_id, c.name AS category_name, t.type, t.amount, t.created_at, t.description
         FROM transactions t
         JOIN transaction_categories c ON c.id = t.category_id
         WHERE ($1::text IS NULL OR t.type = $1)
           AND ($2::date IS NULL OR t.created_at::date >= $2)
           AND ($3::date IS NULL OR t.created_at::date <= $3)
         ORDER BY t.created_at DESC, t.id"
    )
    .bind(kind)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Inserts the transaction only if `category_id` names a category of the same
/// type. Returns `None` when no such category exists.
pub async fn create(
    pool: &PgPool,
    input: &CreateTransaction,
) -> Result<Option<Transaction>, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query_as::<_, Transaction>(
        "WITH inserted AS (
             INSERT INTO transactions (id, category_id, type, amount, description)
             SELECT $1, c.id, c.type, $3, $4
             FROM transaction_categories c
             WHERE c.id = $2 AND c.type = $5
             RETURNING id, category_id, type, amount, created_at, description
         )
         SELECT i.id, i.category_id, c.name AS category_name, i.type, i.amount, i.created_at, i.description
         FROM inserted i
         JOIN transaction_categories c ON c.id = i.category_id"
    )
    .bind(id)
    .bind(input.category_id)
    .bind(&input.amount)
    .bind(&input.description)
    .bind(input.kind)
    .fetch_optional(pool)
    .await
}
