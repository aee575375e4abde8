use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// The caller behind the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Me {
    pub id: uuid::Uuid,
    pub fullname: String,
    pub email: String,
}
