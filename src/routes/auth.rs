use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::db::session_queries;
use crate::errors::AppError;
use crate::models::{DataEnvelope, Me};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub ok: bool,
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
}

fn session_removal() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

// Always emits the removal cookie, whether or not the request carried one.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    info!("POST /api/auth/logout - Clearing session cookie");
    let jar = jar.add(session_removal());
    (
        jar,
        Json(LogoutResponse {
            ok: true,
            message: "Logout successfully".to_string(),
        }),
    )
}

pub async fn me(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<DataEnvelope<Me>>, AppError> {
    info!("GET /api/auth/me - Resolving current user");
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let user = session_queries::fetch_user_by_token(&state.pool, &token)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {}", e);
            AppError::db("failed_to_fetch_user")(e)
        })?
        .ok_or_else(|| {
            info!("Session token did not match a live session");
            AppError::Unauthorized
        })?;

    Ok(Json(DataEnvelope::new(user)))
}
