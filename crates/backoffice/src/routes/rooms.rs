//! Room route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use staybook_core::{LocationId, RoomId};

use crate::coordinator::{FormMode, RoomForm};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stay::{Location, Room};

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
}

/// `GET /rooms` - one page of rooms.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<Room>>> {
    let rooms = state.rooms().list(query.page.unwrap_or(1)).await?;
    Ok(Json(rooms))
}

/// `GET /rooms/{id}` - room detail.
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Room>> {
    let room = state.rooms().get(RoomId::new(id)).await?;
    Ok(Json(room))
}

/// `POST /rooms` - create a room from a validated form.
pub async fn create(
    State(state): State<AppState>,
    Json(mut form): Json<RoomForm>,
) -> Result<(StatusCode, Json<Room>)> {
    form.mode = FormMode::Add;
    form.id = None;
    let room = state.rooms().submit(&form).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// `PUT /rooms/{id}` - update a room from a validated form.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut form): Json<RoomForm>,
) -> Result<Json<Room>> {
    form.mode = FormMode::Edit;
    form.id = Some(RoomId::new(id));
    let room = state.rooms().submit(&form).await?;
    Ok(Json(room))
}

/// `DELETE /rooms/{id}` - delete a room.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.rooms().delete(RoomId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /rooms/{id}/image` - upload a room image (multipart, one file part).
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<Room>> {
    let (file_name, bytes) = read_file_part(&mut multipart).await?;
    let room = state
        .rooms()
        .attach_image(RoomId::new(id), file_name, bytes)
        .await?;
    Ok(Json(room))
}

/// `GET /locations/{id}` - location lookup used by the room form.
pub async fn show_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Location>> {
    let location = state.stay().get_location(LocationId::new(id)).await?;
    Ok(Json(location))
}

/// Pull the first file part out of a multipart body.
pub(super) async fn read_file_part(multipart: &mut Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?;
        return Ok((file_name, bytes.to_vec()));
    }
    Err(AppError::BadRequest("No file part in upload".to_string()))
}
