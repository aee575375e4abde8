use sqlx::PgPool;
use crate::models::TransactionCategory;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<TransactionCategory>, sqlx::Error> {
    sqlx::query_as::<_, TransactionCategory>(
        "SELECT id, name, description, type
         FROM transaction_categories
         ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await
}
