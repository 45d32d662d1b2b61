use std::env;

use crate::errors::AppError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Identity established by the external login flow and handed to this
/// process through the environment. The dashboard never validates
/// credentials itself, it just forwards the token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub auth_token: Option<String>,
}

/// Reads `HABIT_USER_ID` and `HABIT_AUTH_TOKEN`. A missing user id is a
/// startup precondition failure; there is nothing to show without one.
pub fn resolve_session() -> Result<Session, AppError> {
    let user_id = env::var("HABIT_USER_ID")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::validation("HABIT_USER_ID is not set; sign in and export a user id first")
        })?;

    let auth_token = env::var("HABIT_AUTH_TOKEN")
        .ok()
        .filter(|value| !value.is_empty());

    Ok(Session {
        user_id,
        auth_token,
    })
}

pub fn resolve_api_url() -> String {
    env::var("HABIT_API_URL")
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
