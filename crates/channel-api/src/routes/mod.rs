//! Route definitions
//!
//! All API routes organized by feature area and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    activity, announcements, channels, governance, health, invites, layout, members, moderation,
    pins, polls, presence, reactions, scheduled, social, templates, threads,
};
use crate::state::AppState;

/// Create the main API router (health is mounted separately to skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(workspace_routes())
        .merge(channel_routes())
        .merge(member_routes())
        .merge(invite_routes())
        .merge(moderation_routes())
        .merge(thread_routes())
        .merge(message_routes())
        .merge(poll_routes())
        .merge(governance_routes())
        .merge(announcement_routes())
        .merge(layout_routes())
        .merge(template_routes())
        .merge(scheduled_routes())
        .merge(presence_routes())
        .merge(social_routes())
        .merge(user_routes())
}

/// Workspace-scoped listings
fn workspace_routes() -> Router<AppState> {
    Router::new()
        .route("/workspaces/:workspace_id/channels", get(channels::list_channels))
        .route("/workspaces/:workspace_id/channels/mine", get(channels::list_user_channels))
        .route("/workspaces/:workspace_id/channels/search", get(channels::search_channels))
        .route("/workspaces/:workspace_id/sections", get(layout::list_sections))
        .route("/workspaces/:workspace_id/templates", get(templates::list_templates))
}

/// Channel lifecycle and reporting
fn channel_routes() -> Router<AppState> {
    Router::new()
        .route("/channels", post(channels::create_channel))
        .route(
            "/channels/:channel_id",
            get(channels::get_channel)
                .patch(channels::update_channel)
                .delete(channels::delete_channel),
        )
        .route("/channels/:channel_id/archive", post(channels::archive_channel))
        .route("/channels/:channel_id/unarchive", post(channels::unarchive_channel))
        .route("/channels/:channel_id/transfer-ownership", post(channels::transfer_ownership))
        .route("/channels/:channel_id/clone", post(channels::clone_channel))
        .route("/channels/:channel_id/stats", get(channels::get_stats))
        .route("/channels/:channel_id/analytics", get(channels::get_analytics))
        .route("/channels/:channel_id/topic-history", get(channels::get_topic_history))
        .route("/channels/:channel_id/activity", get(activity::get_channel_activity))
}

/// Membership
fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/members",
            get(members::list_members).post(members::add_member),
        )
        .route(
            "/channels/:channel_id/members/:user_id",
            get(members::get_member).delete(members::remove_member),
        )
        .route("/channels/:channel_id/members/:user_id/role", patch(members::update_member_role))
        .route("/channels/:channel_id/leave", post(members::leave_channel))
        .route("/channels/:channel_id/notifications", patch(members::update_notifications))
        .route("/channels/:channel_id/read-state", post(members::update_last_read))
        .route(
            "/channels/:channel_id/bulk-members",
            post(members::bulk_add_members).delete(members::bulk_delete_members),
        )
        .route("/channels/:channel_id/bulk-roles", patch(members::bulk_update_roles))
}

/// Invites
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/invites",
            get(invites::list_invites).post(invites::create_invite),
        )
        .route("/channels/:channel_id/invites/:invite_id", delete(invites::delete_invite))
        .route("/invites/:code/join", post(invites::join_by_code))
}

/// Bans, mutes, and the moderation log
fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/bans", get(moderation::list_bans))
        .route(
            "/channels/:channel_id/bans/:user_id",
            put(moderation::ban_member).delete(moderation::unban_member),
        )
        .route("/channels/:channel_id/mutes", get(moderation::list_mutes))
        .route(
            "/channels/:channel_id/mutes/:user_id",
            get(moderation::get_mute_status)
                .put(moderation::mute_member)
                .delete(moderation::unmute_member),
        )
        .route("/channels/:channel_id/moderation-log", get(moderation::get_moderation_history))
}

/// Threads and replies
fn thread_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/threads",
            get(threads::list_threads).post(threads::create_thread),
        )
        .route(
            "/channels/:channel_id/threads/:thread_id",
            get(threads::get_thread)
                .patch(threads::update_thread)
                .delete(threads::delete_thread),
        )
        .route(
            "/channels/:channel_id/threads/:thread_id/replies",
            get(threads::list_replies).post(threads::create_reply),
        )
        .route(
            "/channels/:channel_id/threads/:thread_id/replies/:reply_id",
            patch(threads::update_reply).delete(threads::delete_reply),
        )
        .route(
            "/channels/:channel_id/threads/:thread_id/follow",
            put(threads::follow_thread).delete(threads::unfollow_thread),
        )
}

/// Message-scoped features: reactions, pins, bookmarks, receipts
fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/messages/:message_id/reactions",
            get(reactions::list_reactions).post(reactions::add_reaction),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/reactions/:emoji",
            delete(reactions::remove_reaction),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/reaction-summary",
            get(reactions::reaction_summary),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/receipts",
            get(social::list_receipts),
        )
        .route(
            "/channels/:channel_id/messages/:message_id/receipts/count",
            get(social::read_count),
        )
        .route("/channels/:channel_id/receipts", post(social::mark_read))
        .route("/channels/:channel_id/pins", get(pins::list_pins).post(pins::pin_message))
        .route("/channels/:channel_id/pins/:message_id", delete(pins::unpin_message))
        .route(
            "/channels/:channel_id/bookmarks",
            get(pins::list_bookmarks).post(pins::create_bookmark),
        )
        .route(
            "/channels/:channel_id/bookmarks/:bookmark_id",
            patch(pins::update_bookmark).delete(pins::delete_bookmark),
        )
}

/// Polls
fn poll_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/polls", get(polls::list_polls).post(polls::create_poll))
        .route("/channels/:channel_id/polls/:poll_id", get(polls::get_poll))
        .route("/channels/:channel_id/polls/:poll_id/votes", post(polls::vote))
        .route("/channels/:channel_id/polls/:poll_id/close", post(polls::close_poll))
        .route("/channels/:channel_id/polls/:poll_id/results", get(polls::get_results))
}

/// Webhooks, permission overrides, settings
fn governance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/webhooks",
            get(governance::list_webhooks).post(governance::create_webhook),
        )
        .route(
            "/channels/:channel_id/webhooks/:webhook_id",
            patch(governance::update_webhook).delete(governance::delete_webhook),
        )
        .route("/channels/:channel_id/webhooks/:webhook_id/test", post(governance::test_webhook))
        .route(
            "/channels/:channel_id/permissions",
            get(governance::list_permissions).put(governance::set_permission),
        )
        .route(
            "/channels/:channel_id/permissions/:permission_id",
            delete(governance::delete_permission),
        )
        .route(
            "/channels/:channel_id/settings",
            get(governance::get_settings).patch(governance::update_settings),
        )
}

/// Announcements
fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/announcements",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route(
            "/channels/:channel_id/announcements/:announcement_id",
            patch(announcements::update_announcement).delete(announcements::delete_announcement),
        )
        .route(
            "/channels/:channel_id/announcements/:announcement_id/pin",
            post(announcements::toggle_pin),
        )
}

/// Tabs, sections, channel links
fn layout_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/tabs", get(layout::list_tabs).post(layout::add_tab))
        .route(
            "/channels/:channel_id/tabs/:tab_id",
            patch(layout::update_tab).delete(layout::remove_tab),
        )
        .route("/channels/:channel_id/tab-order", put(layout::reorder_tabs))
        .route("/sections", post(layout::create_section))
        .route(
            "/sections/:section_id",
            patch(layout::update_section).delete(layout::delete_section),
        )
        .route("/channels/:channel_id/links", get(layout::list_links).post(layout::create_link))
        .route(
            "/channels/:channel_id/links/:link_id",
            get(layout::get_link).delete(layout::delete_link),
        )
}

/// Templates
fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/templates", post(templates::create_template))
        .route(
            "/templates/:template_id",
            get(templates::get_template)
                .patch(templates::update_template)
                .delete(templates::delete_template),
        )
        .route("/templates/:template_id/apply", post(templates::apply_template))
        .route("/channels/:channel_id/templates", post(templates::create_from_channel))
}

/// Scheduled messages
fn scheduled_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/scheduled-messages",
            get(scheduled::list_scheduled).post(scheduled::create_scheduled),
        )
        .route(
            "/channels/:channel_id/scheduled-messages/:message_id",
            get(scheduled::get_scheduled)
                .patch(scheduled::update_scheduled)
                .delete(scheduled::cancel_scheduled),
        )
}

/// Voice and typing
fn presence_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel_id/voice/join", post(presence::join_voice))
        .route("/channels/:channel_id/voice/leave", post(presence::leave_voice))
        .route("/channels/:channel_id/voice/state", patch(presence::update_voice_state))
        .route("/channels/:channel_id/voice/participants", get(presence::list_participants))
        .route("/channels/:channel_id/voice/count", get(presence::count_participants))
        .route(
            "/channels/:channel_id/typing",
            get(presence::get_typing).post(presence::set_typing),
        )
}

/// Followers and stars
fn social_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/channels/:channel_id/follow",
            get(social::is_following).put(social::follow).delete(social::unfollow),
        )
        .route("/channels/:channel_id/followers", get(social::list_followers))
        .route("/channels/:channel_id/followers/count", get(social::count_followers))
        .route(
            "/channels/:channel_id/star",
            put(social::star).delete(social::unstar),
        )
}

/// Caller-scoped listings
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me/scheduled-messages", get(scheduled::list_my_scheduled))
        .route("/users/@me/followed-channels", get(social::list_followed_channels))
        .route("/users/@me/starred", get(social::list_starred))
        .route("/users/@me/activity", get(activity::get_user_activity))
}
