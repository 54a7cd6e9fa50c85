//! Review comment coordinator.
//!
//! Comments are fetched per room and paginated locally, ten per page, with
//! a windowed page strip (current page plus two neighbours on each side,
//! first and last always shown, gaps collapsed to an ellipsis).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use staybook_core::{RoomId, UserId};
use tracing::instrument;

use crate::stay::{Comment, CommentDraft, StayClient};

use super::{CoordinatorError, FieldError};

/// Comments shown per page.
pub const COMMENTS_PER_PAGE: usize = 10;

/// Neighbours of the current page shown on each side of the strip.
const PAGE_WINDOW: u32 = 2;

/// One element of the rendered page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Editable state of the comment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub room_id: RoomId,
    pub commenter_id: UserId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub rating: u8,
}

impl CommentForm {
    /// Empty form for commenting on a room.
    #[must_use]
    pub fn new(room_id: RoomId, commenter_id: UserId) -> Self {
        Self {
            room_id,
            commenter_id,
            content: String::new(),
            rating: 0,
        }
    }

    /// Local validation.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("noiDung", "Comment content is required"));
        }
        if !(1..=5).contains(&self.rating) {
            errors.push(FieldError::new(
                "saoBinhLuan",
                "Rating must be between 1 and 5 stars",
            ));
        }
        errors
    }

    fn draft(&self) -> CommentDraft {
        CommentDraft {
            room_id: self.room_id,
            commenter_id: self.commenter_id,
            // The platform stores the submission instant, second precision.
            date: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            content: self.content.trim().to_string(),
            rating: self.rating,
        }
    }
}

/// Coordinates per-room comment listing and submission.
#[derive(Clone)]
pub struct CommentCoordinator {
    client: StayClient,
}

impl CommentCoordinator {
    /// Create a coordinator over the shared client.
    #[must_use]
    pub const fn new(client: StayClient) -> Self {
        Self { client }
    }

    /// All comments for a room, newest last as the platform returns them.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the fetch fails.
    pub async fn list(&self, room_id: RoomId) -> Result<Vec<Comment>, CoordinatorError> {
        Ok(self.client.list_comments(room_id).await?)
    }

    /// The comments belonging to one local page, plus the effective page
    /// number and the page count. A past-the-end request clamps to the last
    /// page rather than returning an empty slice.
    ///
    /// # Errors
    ///
    /// Returns a notice-level error if the fetch fails.
    pub async fn list_page(
        &self,
        room_id: RoomId,
        page: u32,
    ) -> Result<(Vec<Comment>, u32, u32), CoordinatorError> {
        let all = self.list(room_id).await?;
        let pages = page_count(all.len());
        let page = page.clamp(1, pages);
        Ok((page_slice(&all, page).to_vec(), page, pages))
    }

    /// Validate and submit a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::Invalid`] for validation failures, or a
    /// notice-level error for rejected submissions.
    #[instrument(skip(self, form), fields(room_id = %form.room_id))]
    pub async fn submit(&self, form: &CommentForm) -> Result<Comment, CoordinatorError> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(CoordinatorError::Invalid(errors));
        }
        Ok(self.client.create_comment(&form.draft()).await?)
    }
}

/// Number of local pages needed for `len` comments. Always at least 1.
#[must_use]
pub fn page_count(len: usize) -> u32 {
    let pages = len.div_ceil(COMMENTS_PER_PAGE).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The slice of `comments` belonging to 1-based `page`.
#[must_use]
pub fn page_slice(comments: &[Comment], page: u32) -> &[Comment] {
    let page = page.max(1) as usize;
    let start = (page - 1) * COMMENTS_PER_PAGE;
    if start >= comments.len() {
        return &[];
    }
    let end = (start + COMMENTS_PER_PAGE).min(comments.len());
    &comments[start..end]
}

/// Windowed page strip for the pagination control.
///
/// Shows the first and last page, the current page and up to two neighbours
/// on each side. A gap of exactly one page is filled in rather than
/// abbreviated; wider gaps collapse to an ellipsis.
#[must_use]
pub fn page_strip(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let mut shown: Vec<u32> = Vec::new();
    for page in 1..=total {
        let near_current =
            page + PAGE_WINDOW >= current && page <= current.saturating_add(PAGE_WINDOW);
        if page == 1 || page == total || near_current {
            shown.push(page);
        }
    }

    let mut strip = Vec::with_capacity(shown.len() + 2);
    let mut prev: Option<u32> = None;
    for page in shown {
        if let Some(prev) = prev {
            if page - prev == 2 {
                strip.push(PageItem::Page(prev + 1));
            } else if page - prev > 2 {
                strip.push(PageItem::Ellipsis);
            }
        }
        strip.push(PageItem::Page(page));
        prev = Some(page);
    }
    strip
}
