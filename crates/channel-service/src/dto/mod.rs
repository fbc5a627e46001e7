//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for the composite views (entities serialize as-is)

pub mod requests;
pub mod responses;

pub use requests::{
    AddMemberRequest, AddReactionRequest, ApplyTemplateRequest, BulkMembersRequest, BulkRoleRequest,
    CloneChannelRequest, CreateAnnouncementRequest, CreateBookmarkRequest, CreateChannelRequest,
    CreateInviteRequest, CreateLinkRequest, CreatePollRequest, CreateReplyRequest,
    CreateScheduledMessageRequest, CreateSectionRequest, CreateTabRequest,
    CreateTemplateFromChannelRequest, CreateTemplateRequest, CreateThreadRequest,
    CreateWebhookRequest, MarkReadRequest, PinMessageRequest, ReorderTabsRequest,
    RestrictMemberRequest, SetPermissionRequest, TransferOwnershipRequest, UpdateAnnouncementRequest,
    UpdateBookmarkRequest, UpdateChannelRequest, UpdateMemberRoleRequest, UpdateNotificationsRequest,
    UpdateReplyRequest, UpdateScheduledMessageRequest, UpdateSectionRequest, UpdateSettingsRequest,
    UpdateTabRequest, UpdateTemplateRequest, UpdateThreadRequest, UpdateWebhookRequest, VoteRequest,
};

pub use responses::{
    ApiResponse, BulkActionResult, ChannelResponse, CountResponse, FollowStatus, HealthChecks,
    HealthResponse, InviteResponse, MuteStatusResponse, PaginatedResponse, PaginationMeta,
    PollResponse, PollResultsResponse, ReadReceiptSummary, ReadinessResponse, TypingResponse,
};
