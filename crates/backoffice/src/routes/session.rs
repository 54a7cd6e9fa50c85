//! Operator session token handlers.
//!
//! The back-office does not authenticate operators itself; it stores the
//! session token issued by the Stay API and attaches it to every upstream
//! request. A 401 from upstream clears the stored token, after which these
//! endpoints are how a fresh token gets installed.

use axum::{Json, extract::State, http::StatusCode};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body of `PUT /session`.
#[derive(Debug, Deserialize)]
pub struct SessionBody {
    pub token: String,
}

/// `PUT /session` - store the operator session token.
pub async fn store(
    State(state): State<AppState>,
    Json(body): Json<SessionBody>,
) -> Result<StatusCode> {
    if body.token.trim().is_empty() {
        return Err(AppError::BadRequest("Token must not be empty".to_string()));
    }
    state
        .stay()
        .set_session_token(SecretString::from(body.token))
        .await;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /session` - clear the operator session token (sign out).
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.stay().clear_session_token().await;
    Ok(StatusCode::NO_CONTENT)
}
