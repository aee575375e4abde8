use sqlx::PgPool;
use crate::models::InvestmentCategory;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<InvestmentCategory>, sqlx::Error> {
    sqlx::query_as::<_, InvestmentCategory>(
        "SELECT id, name, description
         FROM investment_categories
         ORDER BY id ASC"
    )
    .fetch_all(pool)
    .await
}
