//! Per-room comment route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use staybook_core::RoomId;

use crate::coordinator::{CommentForm, PageItem, comments::page_strip};
use crate::error::Result;
use crate::state::AppState;
use crate::stay::Comment;

use super::rooms::PaginationQuery;

/// One page of comments plus the rendered pagination strip.
#[derive(Debug, Serialize)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub page: u32,
    pub total_pages: u32,
    pub strip: Vec<PageItem>,
}

/// `GET /rooms/{id}/comments` - one local page of a room's comments.
pub async fn index(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<CommentPage>> {
    let requested = query.page.unwrap_or(1);
    let (comments, page, total_pages) = state
        .comments()
        .list_page(RoomId::new(id), requested)
        .await?;
    Ok(Json(CommentPage {
        comments,
        page,
        total_pages,
        strip: page_strip(page, total_pages),
    }))
}

/// `POST /rooms/{id}/comments` - submit a comment on a room.
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut form): Json<CommentForm>,
) -> Result<(StatusCode, Json<Comment>)> {
    form.room_id = RoomId::new(id);
    let comment = state.comments().submit(&form).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
