//! Sidebar section service
//!
//! Sections belong to one user in one workspace; channel roles play no part.

use channel_core::{DomainError, Section, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateSectionRequest, UpdateSectionRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Sidebar section service
pub struct SectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SectionService<'a> {
    /// Create a new SectionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append a section to the caller's sidebar
    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn create_section(&self, user_id: Snowflake, request: CreateSectionRequest) -> ServiceResult<Section> {
        request.validate()?;

        let position = self
            .ctx
            .section_repo()
            .next_position(request.workspace_id, user_id)
            .await?;
        let mut section = Section::new(
            self.ctx.generate_id(),
            request.workspace_id,
            user_id,
            request.name,
            position,
        );
        section.set_channels(request.channel_ids);

        self.ctx.section_repo().create(&section).await?;

        info!(section_id = %section.id, position, "Section created");
        Ok(section)
    }

    /// The caller's sections by position
    #[instrument(skip(self))]
    pub async fn list_sections(&self, workspace_id: Snowflake, user_id: Snowflake) -> ServiceResult<Vec<Section>> {
        Ok(self.ctx.section_repo().list(workspace_id, user_id).await?)
    }

    /// Rename, refill or collapse a section
    #[instrument(skip(self, request))]
    pub async fn update_section(
        &self,
        user_id: Snowflake,
        section_id: Snowflake,
        request: UpdateSectionRequest,
    ) -> ServiceResult<Section> {
        request.validate()?;

        let mut section = self.load_own(user_id, section_id).await?;
        if let Some(name) = request.name {
            section.name = name;
        }
        if let Some(channel_ids) = request.channel_ids {
            section.set_channels(channel_ids);
        }
        if let Some(collapsed) = request.is_collapsed {
            section.is_collapsed = collapsed;
        }
        section.updated_at = chrono::Utc::now();

        self.ctx.section_repo().update(&section).await?;
        Ok(section)
    }

    /// Delete a section
    #[instrument(skip(self))]
    pub async fn delete_section(&self, user_id: Snowflake, section_id: Snowflake) -> ServiceResult<()> {
        self.load_own(user_id, section_id).await?;
        self.ctx.section_repo().delete(section_id).await?;

        info!(section_id = %section_id, "Section deleted");
        Ok(())
    }

    async fn load_own(&self, user_id: Snowflake, section_id: Snowflake) -> ServiceResult<Section> {
        let section = self
            .ctx
            .section_repo()
            .find(section_id)
            .await?
            .ok_or(DomainError::SectionNotFound)?;
        if !section.is_owned_by(user_id) {
            return Err(DomainError::NotAuthorized.into());
        }
        Ok(section)
    }
}
