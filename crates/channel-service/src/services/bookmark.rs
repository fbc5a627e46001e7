//! Bookmark service
//!
//! Bookmarks are private to the user who made them and capped per channel.

use channel_core::{Bookmark, DomainError, Snowflake, MAX_BOOKMARKS_PER_USER};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateBookmarkRequest, UpdateBookmarkRequest};

use super::access::{ensure_in_channel, ChannelAccess};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Bookmark service
pub struct BookmarkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookmarkService<'a> {
    /// Create a new BookmarkService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a bookmark after the caller's last one
    #[instrument(skip(self, request))]
    pub async fn create_bookmark(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        request: CreateBookmarkRequest,
    ) -> ServiceResult<Bookmark> {
        request.validate()?;
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;

        let count = self.ctx.bookmark_repo().count(channel_id, user_id).await?;
        if count >= MAX_BOOKMARKS_PER_USER {
            return Err(DomainError::BookmarkLimitReached {
                max: MAX_BOOKMARKS_PER_USER,
            }
            .into());
        }

        let position = self.ctx.bookmark_repo().next_position(channel_id, user_id).await?;
        let mut bookmark = Bookmark::new(self.ctx.generate_id(), channel_id, user_id, request.title, position);
        bookmark.url = request.url;
        bookmark.entity_type = request.entity_type;
        bookmark.entity_id = request.entity_id;

        self.ctx.bookmark_repo().create(&bookmark).await?;

        info!(channel_id = %channel_id, bookmark_id = %bookmark.id, position, "Bookmark created");
        Ok(bookmark)
    }

    /// The caller's bookmarks by position
    #[instrument(skip(self))]
    pub async fn list_bookmarks(&self, channel_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Bookmark>> {
        ChannelAccess::new(self.ctx).require_member(channel_id, user_id).await?;
        Ok(self.ctx.bookmark_repo().list(channel_id, user_id).await?)
    }

    /// Rename or retarget a bookmark
    #[instrument(skip(self, request))]
    pub async fn update_bookmark(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        bookmark_id: Snowflake,
        request: UpdateBookmarkRequest,
    ) -> ServiceResult<Bookmark> {
        request.validate()?;

        let mut bookmark = self.load_own(channel_id, user_id, bookmark_id).await?;
        if let Some(title) = request.title {
            bookmark.title = title;
        }
        if request.url.is_some() {
            bookmark.url = request.url;
        }
        bookmark.updated_at = Utc::now();

        self.ctx.bookmark_repo().update(&bookmark).await?;
        Ok(bookmark)
    }

    /// Delete a bookmark
    #[instrument(skip(self))]
    pub async fn delete_bookmark(&self, channel_id: Snowflake, user_id: Snowflake, bookmark_id: Snowflake) -> ServiceResult<()> {
        self.load_own(channel_id, user_id, bookmark_id).await?;
        self.ctx.bookmark_repo().delete(bookmark_id).await?;

        info!(channel_id = %channel_id, bookmark_id = %bookmark_id, "Bookmark deleted");
        Ok(())
    }

    async fn load_own(&self, channel_id: Snowflake, user_id: Snowflake, bookmark_id: Snowflake) -> ServiceResult<Bookmark> {
        let bookmark = self
            .ctx
            .bookmark_repo()
            .find(bookmark_id)
            .await?
            .ok_or(DomainError::BookmarkNotFound)?;
        ensure_in_channel(bookmark.channel_id, channel_id, || DomainError::BookmarkNotFound)?;

        if !bookmark.is_owned_by(user_id) {
            return Err(DomainError::NotAuthorized.into());
        }
        Ok(bookmark)
    }
}
