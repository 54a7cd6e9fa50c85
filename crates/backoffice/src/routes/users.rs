//! User route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use staybook_core::UserId;

use crate::coordinator::{FormMode, UserForm};
use crate::error::Result;
use crate::state::AppState;
use crate::stay::User;

use super::rooms::read_file_part;

/// `GET /users` - all user accounts.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users().list().await?;
    Ok(Json(users))
}

/// `GET /users/{id}` - account detail.
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    let user = state.users().get(UserId::new(id)).await?;
    Ok(Json(user))
}

/// `POST /users` - create an account from a validated form.
pub async fn create(
    State(state): State<AppState>,
    Json(mut form): Json<UserForm>,
) -> Result<(StatusCode, Json<User>)> {
    form.mode = FormMode::Add;
    form.id = None;
    let user = state.users().submit(&form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users/{id}` - update an account from a validated form.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut form): Json<UserForm>,
) -> Result<Json<User>> {
    form.mode = FormMode::Edit;
    form.id = Some(UserId::new(id));
    let user = state.users().submit(&form).await?;
    Ok(Json(user))
}

/// `DELETE /users/{id}` - delete an account.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.users().delete(UserId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /users/avatar` - upload an avatar for the signed-in operator.
pub async fn upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<User>> {
    let (file_name, bytes) = read_file_part(&mut multipart).await?;
    let user = state.users().upload_avatar(file_name, bytes).await?;
    Ok(Json(user))
}
