use sqlx::PgPool;
use crate::models::Investment;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Investment>, sqlx::Error> {
    sqlx::query_as::<_, Investment>(
        "SELECT i.id, i.category_id, c.name AS category_name, i.amount, i.created_at, i.description
         FROM investments i
         JOIN investment_categories c ON c.id = i.category_id
         ORDER BY i.created_at DESC, i.id"
    )
    .fetch_all(pool)
    .await
}
