use sqlx::PgPool;
use crate::models::Me;

/// Resolves an opaque session token to its user. Expired sessions resolve to `None`.
pub async fn fetch_user_by_token(pool: &PgPool, token: &str) -> Result<Option<Me>, sqlx::Error> {
    sqlx::query_as::<_, Me>(
        "SELECT u.id, u.fullname, u.email
         FROM sessions s
         JOIN users u ON u.id = s.user_id
         WHERE s.token = $1 AND s.expires_at > NOW()"
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
