//! Service-layer behaviour tests
//!
//! Every service runs against the in-memory store in `common`, so these
//! tests need no database or Redis.

mod common;

use chrono::{Duration, Utc};

use channel_core::{
    ChannelType, DomainError, Invite, InviteRepository, LinkType, MemberRole, NotificationLevel, Page,
    ScheduledStatus, Snowflake, MAX_BOOKMARKS_PER_USER,
};
use channel_service::dto::{
    AddMemberRequest, AddReactionRequest, ApplyTemplateRequest, BulkMembersRequest,
    CloneChannelRequest, CreateBookmarkRequest, CreateChannelRequest, CreateInviteRequest,
    CreateLinkRequest, CreatePollRequest, CreateReplyRequest, CreateScheduledMessageRequest,
    CreateSectionRequest, CreateTabRequest, CreateTemplateRequest, CreateThreadRequest,
    ReorderTabsRequest, RestrictMemberRequest, UpdateChannelRequest, UpdateSectionRequest,
    UpdateSettingsRequest, UpdateTemplateRequest, UpdateThreadRequest, VoteRequest,
};
use channel_service::services::{
    BookmarkService, ChannelService, InviteService, LinkService, MemberService, ModerationService,
    PermissionService, PinService, PollService, ReactionService, ScheduledMessageService,
    SectionService, SettingsService, TabService, TemplateService, ThreadService, TypingService,
    VoiceService, WebhookService,
};
use serde_json::json;
use channel_service::ServiceError;

use common::{Harness, RecordingPublisher, ALICE, BOB, CAROL, MESSAGE, OWNER, WORKSPACE};

// ============================================================================
// Helpers
// ============================================================================

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().expect("domain error")
}

async fn new_channel(h: &Harness, name: &str) -> Snowflake {
    ChannelService::new(&h.ctx)
        .create_channel(
            OWNER,
            CreateChannelRequest {
                workspace_id: WORKSPACE,
                name: name.to_string(),
                channel_type: None,
                description: Some("about things".to_string()),
            },
        )
        .await
        .expect("create channel")
        .id
}

async fn add(h: &Harness, channel_id: Snowflake, user_id: Snowflake, role: Option<MemberRole>) {
    MemberService::new(&h.ctx)
        .add_member(channel_id, OWNER, AddMemberRequest { user_id, role })
        .await
        .expect("add member");
}

fn poll_request(multi_choice: bool) -> CreatePollRequest {
    CreatePollRequest {
        question: "Lunch?".to_string(),
        options: vec!["Pizza".to_string(), " Sushi ".to_string()],
        is_anonymous: false,
        multi_choice,
        expires_at: None,
    }
}

// ============================================================================
// Channel lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_channel_makes_creator_owner() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let view = ChannelService::new(&h.ctx)
        .get_channel(channel_id, OWNER)
        .await
        .unwrap();

    assert_eq!(view.channel.channel_type, ChannelType::Public);
    assert_eq!(view.channel.created_by, Some(OWNER));
    assert_eq!(view.member_count, 1);
    assert_eq!(view.my_role, Some(MemberRole::Owner));
    assert!(h.cache.is_cached(channel_id));
    assert_eq!(h.store.activity_actions(channel_id), vec!["channel_created"]);
}

#[tokio::test]
async fn test_duplicate_name_in_workspace_rejected() {
    let h = Harness::new();
    new_channel(&h, "general").await;

    let err = ChannelService::new(&h.ctx)
        .create_channel(
            ALICE,
            CreateChannelRequest {
                workspace_id: WORKSPACE,
                name: "general".to_string(),
                channel_type: Some(ChannelType::Private),
                description: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(domain(&err), DomainError::ChannelNameTaken));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_archive_blocks_new_members_until_unarchived() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let channels = ChannelService::new(&h.ctx);
    let members = MemberService::new(&h.ctx);

    channels.archive_channel(channel_id, OWNER).await.unwrap();
    let err = members
        .add_member(channel_id, OWNER, AddMemberRequest { user_id: ALICE, role: None })
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ChannelArchived));

    channels.unarchive_channel(channel_id, OWNER).await.unwrap();
    let member = members
        .add_member(channel_id, OWNER, AddMemberRequest { user_id: ALICE, role: None })
        .await
        .unwrap();
    assert_eq!(member.role, MemberRole::Member);

    let actions = h.store.activity_actions(channel_id);
    assert!(actions.contains(&"channel_archived".to_string()));
    assert!(actions.contains(&"channel_unarchived".to_string()));
}

#[tokio::test]
async fn test_topic_change_records_history_once() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let channels = ChannelService::new(&h.ctx);

    let topic = UpdateChannelRequest {
        topic: Some("Release week".to_string()),
        ..Default::default()
    };
    channels.update_channel(channel_id, OWNER, topic.clone()).await.unwrap();
    // Same topic again is not a change
    channels.update_channel(channel_id, OWNER, topic).await.unwrap();

    let history = channels
        .get_topic_history(channel_id, OWNER, Page::new(10, 0))
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].old_topic, None);
    assert_eq!(history[0].new_topic.as_deref(), Some("Release week"));
    assert!(!h.cache.is_cached(channel_id));
}

#[tokio::test]
async fn test_owner_leaves_only_after_transfer() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let members = MemberService::new(&h.ctx);

    let err = members.leave_channel(channel_id, OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::CannotLeaveOwner));

    ChannelService::new(&h.ctx)
        .transfer_ownership(channel_id, OWNER, ALICE)
        .await
        .unwrap();
    assert_eq!(members.get_member(channel_id, ALICE).await.unwrap().role, MemberRole::Owner);
    assert_eq!(members.get_member(channel_id, OWNER).await.unwrap().role, MemberRole::Admin);

    members.leave_channel(channel_id, OWNER).await.unwrap();
    let err = members.get_member(channel_id, OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::MemberNotFound));
}

#[tokio::test]
async fn test_transfer_to_non_member_rejected() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let err = ChannelService::new(&h.ctx)
        .transfer_ownership(channel_id, OWNER, BOB)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotMember));
}

#[tokio::test]
async fn test_clone_copies_roster_and_demotes_other_owners() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, Some(MemberRole::Admin)).await;
    add(&h, channel_id, BOB, None).await;

    // Alice clones; the original owner comes across as admin
    let clone = ChannelService::new(&h.ctx)
        .clone_channel(
            channel_id,
            ALICE,
            CloneChannelRequest {
                name: "general-copy".to_string(),
                include_members: true,
                include_pins: false,
                include_settings: false,
            },
        )
        .await
        .unwrap();

    let members = MemberService::new(&h.ctx);
    assert_eq!(clone.description.as_deref(), Some("about things"));
    assert_eq!(members.list_members(clone.id).await.unwrap().len(), 3);
    assert_eq!(members.get_member(clone.id, ALICE).await.unwrap().role, MemberRole::Owner);
    assert_eq!(members.get_member(clone.id, OWNER).await.unwrap().role, MemberRole::Admin);
    assert_eq!(members.get_member(clone.id, BOB).await.unwrap().role, MemberRole::Member);
    assert!(h.events.names().contains(&"channel.cloned".to_string()));
}

#[tokio::test]
async fn test_clone_copies_pins_settings_and_notification_levels() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    MemberService::new(&h.ctx)
        .update_notifications(channel_id, ALICE, NotificationLevel::Mentions)
        .await
        .unwrap();
    PinService::new(&h.ctx).pin_message(channel_id, OWNER, MESSAGE).await.unwrap();
    SettingsService::new(&h.ctx)
        .update_settings(
            channel_id,
            OWNER,
            UpdateSettingsRequest {
                slow_mode_interval: Some(15),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let clone = ChannelService::new(&h.ctx)
        .clone_channel(
            channel_id,
            OWNER,
            CloneChannelRequest {
                name: "general-copy".to_string(),
                include_members: true,
                include_pins: true,
                include_settings: true,
            },
        )
        .await
        .unwrap();

    let alice = MemberService::new(&h.ctx).get_member(clone.id, ALICE).await.unwrap();
    assert_eq!(alice.notifications, NotificationLevel::Mentions);

    let pins = PinService::new(&h.ctx).list_pins(clone.id, OWNER).await.unwrap();
    assert_eq!(pins.len(), 1);
    assert_eq!(pins[0].message_id, MESSAGE);

    let settings = SettingsService::new(&h.ctx).get_settings(clone.id, OWNER).await.unwrap();
    assert_eq!(settings.slow_mode_interval, 15);
    assert_eq!(settings.channel_id, clone.id);
}

#[tokio::test]
async fn test_clone_without_flags_copies_identity_only() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    PinService::new(&h.ctx).pin_message(channel_id, OWNER, MESSAGE).await.unwrap();

    let clone = ChannelService::new(&h.ctx)
        .clone_channel(
            channel_id,
            OWNER,
            CloneChannelRequest {
                name: "bare".to_string(),
                include_members: false,
                include_pins: false,
                include_settings: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(MemberService::new(&h.ctx).list_members(clone.id).await.unwrap().len(), 1);
    assert!(PinService::new(&h.ctx).list_pins(clone.id, OWNER).await.unwrap().is_empty());
    let settings = SettingsService::new(&h.ctx).get_settings(clone.id, OWNER).await.unwrap();
    assert_eq!(settings.slow_mode_interval, 0);
}

#[tokio::test]
async fn test_clone_into_taken_name_leaves_no_rows() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    new_channel(&h, "random").await;
    PinService::new(&h.ctx).pin_message(channel_id, OWNER, MESSAGE).await.unwrap();
    let channels_before = ChannelService::new(&h.ctx).list_channels(WORKSPACE).await.unwrap().len();

    let err = ChannelService::new(&h.ctx)
        .clone_channel(
            channel_id,
            OWNER,
            CloneChannelRequest {
                name: "random".to_string(),
                include_members: true,
                include_pins: true,
                include_settings: true,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(domain(&err), DomainError::ChannelNameTaken));
    assert_eq!(
        ChannelService::new(&h.ctx).list_channels(WORKSPACE).await.unwrap().len(),
        channels_before
    );
    assert!(!h.events.names().contains(&"channel.cloned".to_string()));
}

#[tokio::test]
async fn test_topic_history_pages_newest_first() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let channels = ChannelService::new(&h.ctx);

    for topic in ["one", "two", "three"] {
        channels
            .update_channel(
                channel_id,
                OWNER,
                UpdateChannelRequest {
                    topic: Some(topic.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let first = channels
        .get_topic_history(channel_id, OWNER, Page::new(2, 0))
        .await
        .unwrap();
    let topics: Vec<_> = first.iter().map(|t| t.new_topic.as_deref()).collect();
    assert_eq!(topics, vec![Some("three"), Some("two")]);

    let rest = channels
        .get_topic_history(channel_id, OWNER, Page::new(2, 2))
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].old_topic, None);
    assert_eq!(rest[0].new_topic.as_deref(), Some("one"));
}

#[tokio::test]
async fn test_rejected_update_records_no_topic() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    new_channel(&h, "random").await;
    let channels = ChannelService::new(&h.ctx);
    channels.get_channel(channel_id, OWNER).await.unwrap();

    let err = channels
        .update_channel(
            channel_id,
            OWNER,
            UpdateChannelRequest {
                name: Some("random".to_string()),
                topic: Some("Release week".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ChannelNameTaken));

    let history = channels
        .get_topic_history(channel_id, OWNER, Page::default())
        .await
        .unwrap();
    assert!(history.is_empty());
    let view = channels.get_channel(channel_id, OWNER).await.unwrap();
    assert_eq!(view.channel.topic, None);
}

#[tokio::test]
async fn test_apply_template_creates_channel_with_settings() {
    let h = Harness::new();
    let templates = TemplateService::new(&h.ctx);
    let template = templates
        .create_template(
            OWNER,
            CreateTemplateRequest {
                workspace_id: WORKSPACE,
                name: "Incident".to_string(),
                description: Some("war room".to_string()),
                channel_type: ChannelType::Private,
                topic: Some("status".to_string()),
                settings: Some(json!({ "slow_mode_interval": 10, "allow_threads": false })),
            },
        )
        .await
        .unwrap();

    let channel = templates
        .apply_template(
            ALICE,
            template.id,
            ApplyTemplateRequest {
                channel_name: "incident-42".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(channel.channel_type, ChannelType::Private);
    assert_eq!(channel.topic.as_deref(), Some("status"));
    let members = MemberService::new(&h.ctx);
    assert_eq!(members.get_member(channel.id, ALICE).await.unwrap().role, MemberRole::Owner);
    let settings = SettingsService::new(&h.ctx).get_settings(channel.id, ALICE).await.unwrap();
    assert_eq!(settings.slow_mode_interval, 10);
    assert!(!settings.allow_threads);
    assert_eq!(templates.get_template(template.id).await.unwrap().use_count, 1);
}

// ============================================================================
// Authorization ladder
// ============================================================================

#[tokio::test]
async fn test_unknown_channel_reported_before_tier() {
    let h = Harness::new();

    let err = ChannelService::new(&h.ctx)
        .archive_channel(Snowflake::new(404), BOB)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ChannelNotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_tier_errors() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let channels = ChannelService::new(&h.ctx);

    // Outsider on a member operation
    let err = channels.get_stats(channel_id, BOB).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotMember));
    assert_eq!(err.status_code(), 403);

    // Plain member on a moderator operation
    let err = channels.archive_channel(channel_id, ALICE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    // Admin on an owner operation
    MemberService::new(&h.ctx)
        .update_member_role(channel_id, OWNER, ALICE, MemberRole::Admin)
        .await
        .unwrap();
    let err = channels.delete_channel(channel_id, ALICE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    channels.delete_channel(channel_id, OWNER).await.unwrap();
    let err = channels.get_channel(channel_id, OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::ChannelNotFound(_)));
}

#[tokio::test]
async fn test_owner_role_cannot_be_granted_directly() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;

    let err = MemberService::new(&h.ctx)
        .update_member_role(channel_id, OWNER, ALICE, MemberRole::Owner)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_sub_entity_in_other_channel_is_not_found() {
    let h = Harness::new();
    let first = new_channel(&h, "first").await;
    let second = new_channel(&h, "second").await;

    let bookmark = BookmarkService::new(&h.ctx)
        .create_bookmark(
            first,
            OWNER,
            CreateBookmarkRequest {
                title: "Runbook".to_string(),
                url: Some("https://example.com/runbook".to_string()),
                entity_type: None,
                entity_id: None,
            },
        )
        .await
        .unwrap();

    let err = BookmarkService::new(&h.ctx)
        .delete_bookmark(second, OWNER, bookmark.id)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::BookmarkNotFound));
}

#[tokio::test]
async fn test_governance_reads_denied_to_members() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;

    let err = WebhookService::new(&h.ctx)
        .list_webhooks(channel_id, ALICE)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    let err = PermissionService::new(&h.ctx)
        .list_permissions(channel_id, ALICE)
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    assert!(WebhookService::new(&h.ctx).list_webhooks(channel_id, OWNER).await.unwrap().is_empty());
    assert!(PermissionService::new(&h.ctx).list_permissions(channel_id, OWNER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sections_are_creator_only() {
    let h = Harness::new();
    let sections = SectionService::new(&h.ctx);
    let section = sections
        .create_section(
            ALICE,
            CreateSectionRequest {
                workspace_id: WORKSPACE,
                name: "Projects".to_string(),
                channel_ids: Vec::new(),
            },
        )
        .await
        .unwrap();

    let rename = UpdateSectionRequest {
        name: Some("Mine now".to_string()),
        ..Default::default()
    };
    let err = sections.update_section(BOB, section.id, rename.clone()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));
    let err = sections.delete_section(BOB, section.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    let renamed = sections.update_section(ALICE, section.id, rename).await.unwrap();
    assert_eq!(renamed.name, "Mine now");
    sections.delete_section(ALICE, section.id).await.unwrap();
}

#[tokio::test]
async fn test_templates_are_creator_only() {
    let h = Harness::new();
    let templates = TemplateService::new(&h.ctx);
    let template = templates
        .create_template(
            ALICE,
            CreateTemplateRequest {
                workspace_id: WORKSPACE,
                name: "Standup".to_string(),
                description: None,
                channel_type: ChannelType::Public,
                topic: None,
                settings: None,
            },
        )
        .await
        .unwrap();

    let edit = UpdateTemplateRequest {
        name: Some("Taken over".to_string()),
        ..Default::default()
    };
    let err = templates.update_template(BOB, template.id, edit.clone()).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));
    let err = templates.delete_template(BOB, template.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    assert_eq!(templates.update_template(ALICE, template.id, edit).await.unwrap().name, "Taken over");
    templates.delete_template(ALICE, template.id).await.unwrap();
    let err = templates.get_template(template.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::TemplateNotFound));
}

// ============================================================================
// Members and moderation
// ============================================================================

#[tokio::test]
async fn test_ban_removes_membership_and_blocks_rejoin() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let moderation = ModerationService::new(&h.ctx);

    moderation
        .ban_member(
            channel_id,
            OWNER,
            ALICE,
            RestrictMemberRequest {
                reason: Some("spam".to_string()),
                expires_at: None,
            },
        )
        .await
        .unwrap();

    let members = MemberService::new(&h.ctx);
    assert!(members.get_member(channel_id, ALICE).await.is_err());
    let err = members
        .add_member(channel_id, OWNER, AddMemberRequest { user_id: ALICE, role: None })
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::UserBanned));

    moderation.unban_member(channel_id, OWNER, ALICE).await.unwrap();
    add(&h, channel_id, ALICE, None).await;

    assert_eq!(h.store.moderation_actions(channel_id), vec!["ban", "unban"]);
    let err = moderation.unban_member(channel_id, OWNER, ALICE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::BanNotFound));
}

#[tokio::test]
async fn test_mute_and_unmute_are_logged() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let moderation = ModerationService::new(&h.ctx);

    moderation
        .mute_member(channel_id, OWNER, ALICE, RestrictMemberRequest::default())
        .await
        .unwrap();
    // Muting does not touch membership
    assert!(MemberService::new(&h.ctx).get_member(channel_id, ALICE).await.is_ok());

    moderation.unmute_member(channel_id, OWNER, ALICE).await.unwrap();
    assert_eq!(h.store.moderation_actions(channel_id), vec!["mute", "unmute"]);

    let err = moderation.unmute_member(channel_id, OWNER, ALICE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::MuteNotFound));
    assert_eq!(h.store.moderation_actions(channel_id).len(), 2);
}

#[tokio::test]
async fn test_mute_listing_and_status() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    add(&h, channel_id, BOB, None).await;
    let moderation = ModerationService::new(&h.ctx);

    moderation
        .mute_member(
            channel_id,
            OWNER,
            ALICE,
            RestrictMemberRequest {
                reason: Some("flooding".to_string()),
                expires_at: Some(Utc::now() + Duration::hours(1)),
            },
        )
        .await
        .unwrap();

    let mutes = moderation.list_mutes(channel_id, OWNER).await.unwrap();
    assert_eq!(mutes.len(), 1);
    assert_eq!(mutes[0].user_id, ALICE);
    assert_eq!(mutes[0].reason.as_deref(), Some("flooding"));

    let err = moderation.list_mutes(channel_id, BOB).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    // Members may check themselves, not each other
    assert!(moderation.mute_status(channel_id, ALICE, ALICE).await.unwrap().is_muted);
    assert!(!moderation.mute_status(channel_id, BOB, BOB).await.unwrap().is_muted);
    let err = moderation.mute_status(channel_id, BOB, ALICE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));
    let err = moderation.mute_status(channel_id, CAROL, CAROL).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotMember));

    moderation.unmute_member(channel_id, OWNER, ALICE).await.unwrap();
    let status = moderation.mute_status(channel_id, OWNER, ALICE).await.unwrap();
    assert_eq!(status.user_id, ALICE);
    assert!(!status.is_muted);
}

#[tokio::test]
async fn test_moderation_history_pages_newest_first() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let moderation = ModerationService::new(&h.ctx);

    moderation
        .mute_member(channel_id, OWNER, ALICE, RestrictMemberRequest::default())
        .await
        .unwrap();
    moderation.unmute_member(channel_id, OWNER, ALICE).await.unwrap();
    moderation
        .ban_member(channel_id, OWNER, ALICE, RestrictMemberRequest::default())
        .await
        .unwrap();

    let newest = moderation
        .get_moderation_history(channel_id, OWNER, Page::new(1, 0))
        .await
        .unwrap();
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].action.as_str(), "ban");

    let older = moderation
        .get_moderation_history(channel_id, OWNER, Page::new(5, 1))
        .await
        .unwrap();
    let actions: Vec<&str> = older.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["unmute", "mute"]);
}

#[tokio::test]
async fn test_owner_cannot_be_banned() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, Some(MemberRole::Admin)).await;

    let err = ModerationService::new(&h.ctx)
        .ban_member(channel_id, ALICE, OWNER, RestrictMemberRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::CannotModerateOwner));
}

#[tokio::test]
async fn test_bulk_add_skips_existing_and_banned() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    ModerationService::new(&h.ctx)
        .ban_member(channel_id, OWNER, BOB, RestrictMemberRequest::default())
        .await
        .unwrap();

    let added = MemberService::new(&h.ctx)
        .bulk_add_members(
            channel_id,
            OWNER,
            BulkMembersRequest {
                user_ids: vec![ALICE, BOB, CAROL, CAROL],
                role: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(added, 1);
    let data = h.events.data("members.bulk_added").unwrap();
    assert_eq!(data["user_ids"], json!([CAROL]));
}

#[tokio::test]
async fn test_bulk_add_announces_only_inserted_users() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let added = MemberService::new(&h.ctx)
        .bulk_add_members(
            channel_id,
            OWNER,
            BulkMembersRequest {
                user_ids: vec![ALICE, BOB],
                role: Some(MemberRole::Admin),
            },
        )
        .await
        .unwrap();
    assert_eq!(added, 2);
    let data = h.events.data("members.bulk_added").unwrap();
    assert_eq!(data["user_ids"], json!([ALICE, BOB]));

    // Nobody new: the event carries an empty list
    let added = MemberService::new(&h.ctx)
        .bulk_add_members(
            channel_id,
            OWNER,
            BulkMembersRequest {
                user_ids: vec![ALICE],
                role: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(added, 0);
    let data = h.events.data("members.bulk_added").unwrap();
    assert_eq!(data["user_ids"], json!([]));
}

#[tokio::test]
async fn test_bulk_delete_skips_self_and_owner() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, Some(MemberRole::Admin)).await;
    add(&h, channel_id, BOB, None).await;

    let result = MemberService::new(&h.ctx)
        .bulk_delete_members(channel_id, ALICE, vec![ALICE, OWNER, BOB, CAROL])
        .await
        .unwrap();

    assert_eq!(result.successful, 1);
    assert_eq!(result.failed, 3);
    assert_eq!(result.errors.len(), 3);

    let members = MemberService::new(&h.ctx).list_members(channel_id).await.unwrap();
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_bulk_delete_rejects_empty_list() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let err = MemberService::new(&h.ctx)
        .bulk_delete_members(channel_id, OWNER, Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// ============================================================================
// Invites
// ============================================================================

#[tokio::test]
async fn test_single_use_invite() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let invites = InviteService::new(&h.ctx);

    let created = invites
        .create_invite(
            channel_id,
            OWNER,
            CreateInviteRequest {
                max_uses: 1,
                expires_at: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.invite.code.len(), 8);
    assert_eq!(created.channel_name, "general");

    let joined = invites.join_by_code(ALICE, &created.invite.code).await.unwrap();
    assert_eq!(joined.id, channel_id);
    assert_eq!(h.store.invite(created.invite.id).unwrap().use_count, 1);

    let err = invites.join_by_code(BOB, &created.invite.code).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InviteMaxUses));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_invite_rejects_existing_member_and_inactive_code() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let invites = InviteService::new(&h.ctx);

    let created = invites
        .create_invite(channel_id, OWNER, CreateInviteRequest::default())
        .await
        .unwrap();

    let err = invites.join_by_code(OWNER, &created.invite.code).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyMember));

    invites.delete_invite(channel_id, OWNER, created.invite.id).await.unwrap();
    let err = invites.join_by_code(ALICE, &created.invite.code).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InviteInactive));
}

#[tokio::test]
async fn test_expired_invite_is_gone() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let mut invite = Invite::new(Snowflake::new(7_000), channel_id, OWNER, "EXPIRED1".to_string());
    invite.expires_at = Some(Utc::now() - Duration::minutes(1));
    InviteRepository::create(h.store.as_ref(), &invite).await.unwrap();

    let err = InviteService::new(&h.ctx).join_by_code(ALICE, "EXPIRED1").await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::InviteExpired));
    assert_eq!(err.status_code(), 410);
    assert!(MemberService::new(&h.ctx).get_member(channel_id, ALICE).await.is_err());
}

#[tokio::test]
async fn test_invite_expiry_must_be_future() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;

    let err = InviteService::new(&h.ctx)
        .create_invite(
            channel_id,
            OWNER,
            CreateInviteRequest {
                max_uses: 0,
                expires_at: Some(Utc::now() - Duration::hours(1)),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// ============================================================================
// Reactions and polls
// ============================================================================

#[tokio::test]
async fn test_reaction_uniqueness() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let reactions = ReactionService::new(&h.ctx);
    let thumbs = || AddReactionRequest { emoji: "👍".to_string() };

    reactions.add_reaction(channel_id, MESSAGE, OWNER, thumbs()).await.unwrap();
    let err = reactions
        .add_reaction(channel_id, MESSAGE, OWNER, thumbs())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ReactionExists));

    reactions.remove_reaction(channel_id, MESSAGE, OWNER, "👍").await.unwrap();
    reactions.add_reaction(channel_id, MESSAGE, OWNER, thumbs()).await.unwrap();

    let summary = reactions.reaction_summary(channel_id, MESSAGE, OWNER).await.unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].count, 1);
}

#[tokio::test]
async fn test_poll_vote_once_then_closed() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let polls = PollService::new(&h.ctx);

    let created = polls.create_poll(channel_id, ALICE, poll_request(false)).await.unwrap();
    assert_eq!(created.options.len(), 2);
    assert_eq!(created.options[1].text, "Sushi");
    let pizza = created.options[0].id;

    polls
        .vote(channel_id, OWNER, created.poll.id, VoteRequest { option_ids: vec![pizza] })
        .await
        .unwrap();
    let err = polls
        .vote(channel_id, OWNER, created.poll.id, VoteRequest { option_ids: vec![pizza] })
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyVoted));

    // The creator closes their own poll
    polls.close_poll(channel_id, ALICE, created.poll.id).await.unwrap();
    let err = polls
        .vote(channel_id, ALICE, created.poll.id, VoteRequest { option_ids: vec![pizza] })
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::PollClosed));

    let results = polls.get_results(channel_id, OWNER, created.poll.id).await.unwrap();
    assert!(results.is_closed);
    assert_eq!(results.total_votes, 1);
    assert_eq!(results.results[0].vote_count, 1);
}

#[tokio::test]
async fn test_single_choice_poll_rejects_multiple_options() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let polls = PollService::new(&h.ctx);

    let created = polls.create_poll(channel_id, OWNER, poll_request(false)).await.unwrap();
    let both = created.options.iter().map(|o| o.id).collect();

    let err = polls
        .vote(channel_id, OWNER, created.poll.id, VoteRequest { option_ids: both })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_pin_twice_rejected() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let pins = PinService::new(&h.ctx);

    pins.pin_message(channel_id, OWNER, MESSAGE).await.unwrap();
    let err = pins.pin_message(channel_id, ALICE, MESSAGE).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyPinned));
    assert_eq!(err.status_code(), 409);

    pins.unpin_message(channel_id, ALICE, MESSAGE).await.unwrap();
    pins.pin_message(channel_id, ALICE, MESSAGE).await.unwrap();
}

// ============================================================================
// Threads
// ============================================================================

async fn new_thread(h: &Harness, channel_id: Snowflake) -> Snowflake {
    ThreadService::new(&h.ctx)
        .create_thread(
            channel_id,
            OWNER,
            CreateThreadRequest {
                message_id: MESSAGE,
                title: Some("Follow-ups".to_string()),
            },
        )
        .await
        .expect("create thread")
        .id
}

fn reply(content: &str) -> CreateReplyRequest {
    CreateReplyRequest {
        content: content.to_string(),
        parent_id: None,
    }
}

#[tokio::test]
async fn test_locked_thread_rejects_replies_even_from_owner() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let thread_id = new_thread(&h, channel_id).await;
    let threads = ThreadService::new(&h.ctx);

    threads
        .update_thread(
            channel_id,
            OWNER,
            thread_id,
            UpdateThreadRequest {
                is_locked: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = threads
        .create_reply(channel_id, OWNER, thread_id, reply("still here?"))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ThreadLocked));
}

#[tokio::test]
async fn test_reply_count_follows_replies() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let thread_id = new_thread(&h, channel_id).await;
    let threads = ThreadService::new(&h.ctx);

    let first = threads
        .create_reply(channel_id, ALICE, thread_id, reply("first"))
        .await
        .unwrap();
    threads
        .create_reply(channel_id, OWNER, thread_id, reply("second"))
        .await
        .unwrap();
    assert_eq!(threads.get_thread(channel_id, OWNER, thread_id).await.unwrap().reply_count, 2);

    threads.delete_reply(channel_id, ALICE, thread_id, first.id).await.unwrap();
    assert_eq!(threads.get_thread(channel_id, OWNER, thread_id).await.unwrap().reply_count, 1);
}

// ============================================================================
// Voice and links
// ============================================================================

#[tokio::test]
async fn test_voice_join_once_until_left() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let voice = VoiceService::new(&h.ctx);

    voice.join(channel_id, OWNER).await.unwrap();
    let err = voice.join(channel_id, OWNER).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::AlreadyInVoice));

    voice.leave(channel_id, OWNER).await.unwrap();
    assert_eq!(voice.count_participants(channel_id, OWNER).await.unwrap(), 0);

    voice.join(channel_id, OWNER).await.unwrap();
    assert_eq!(voice.count_participants(channel_id, OWNER).await.unwrap(), 1);
}

#[tokio::test]
async fn test_link_removed_only_from_source_side() {
    let h = Harness::new();
    let source = new_channel(&h, "general").await;
    let target = new_channel(&h, "random").await;
    let links = LinkService::new(&h.ctx);

    let link = links
        .create_link(
            source,
            OWNER,
            CreateLinkRequest {
                target_channel_id: target,
                link_type: LinkType::default(),
            },
        )
        .await
        .unwrap();

    // Visible from the target, but not removable there
    assert_eq!(links.get_link(target, OWNER, link.id).await.unwrap().id, link.id);
    let err = links.delete_link(target, OWNER, link.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    links.delete_link(source, OWNER, link.id).await.unwrap();
    let err = links.get_link(target, OWNER, link.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::LinkNotFound));
}

// ============================================================================
// Per-user content
// ============================================================================

#[tokio::test]
async fn test_scheduled_message_in_past_rejected() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let scheduled = ScheduledMessageService::new(&h.ctx);

    let past = (Utc::now() - Duration::minutes(5)).to_rfc3339();
    let err = scheduled
        .create(
            channel_id,
            OWNER,
            CreateScheduledMessageRequest {
                content: "too late".to_string(),
                scheduled_at: past,
                thread_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::ScheduledTimeInPast));
    assert_eq!(h.store.scheduled_count(), 0);

    let future = (Utc::now() + Duration::hours(1)).to_rfc3339();
    let message = scheduled
        .create(
            channel_id,
            OWNER,
            CreateScheduledMessageRequest {
                content: "standup".to_string(),
                scheduled_at: future,
                thread_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(message.status, ScheduledStatus::Pending);

    let cancelled = scheduled.cancel(channel_id, OWNER, message.id).await.unwrap();
    assert_eq!(cancelled.status, ScheduledStatus::Cancelled);
    let err = scheduled.cancel(channel_id, OWNER, message.id).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::ScheduledMessageNotPending));
}

#[tokio::test]
async fn test_bookmark_cap() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let bookmarks = BookmarkService::new(&h.ctx);
    let request = |n: i64| CreateBookmarkRequest {
        title: format!("link {n}"),
        url: None,
        entity_type: None,
        entity_id: None,
    };

    for n in 0..MAX_BOOKMARKS_PER_USER {
        let bookmark = bookmarks.create_bookmark(channel_id, OWNER, request(n)).await.unwrap();
        assert_eq!(i64::from(bookmark.position), n);
    }

    let err = bookmarks
        .create_bookmark(channel_id, OWNER, request(MAX_BOOKMARKS_PER_USER))
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::BookmarkLimitReached { max: 100 }));
}

// ============================================================================
// Settings, layout, events
// ============================================================================

#[tokio::test]
async fn test_settings_default_then_patch() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let settings = SettingsService::new(&h.ctx);

    let defaults = settings.get_settings(channel_id, ALICE).await.unwrap();
    assert_eq!(defaults.max_pins, 50);
    assert!(defaults.allow_threads);

    let updated = settings
        .update_settings(
            channel_id,
            OWNER,
            UpdateSettingsRequest {
                slow_mode_interval: Some(30),
                allow_threads: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.slow_mode_interval, 30);
    assert!(!updated.allow_threads);
    assert_eq!(updated.max_pins, 50);

    let err = settings
        .update_settings(channel_id, ALICE, UpdateSettingsRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotAuthorized));

    assert!(h
        .store
        .activity_actions(channel_id)
        .contains(&"settings_updated".to_string()));
}

#[tokio::test]
async fn test_tab_reorder() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    let tabs = TabService::new(&h.ctx);

    let mut ids = Vec::new();
    for name in ["Docs", "Board", "Links"] {
        let tab = tabs
            .add_tab(
                channel_id,
                OWNER,
                CreateTabRequest {
                    name: name.to_string(),
                    tab_type: "link".to_string(),
                    config: None,
                },
            )
            .await
            .unwrap();
        ids.push(tab.id);
    }

    let reordered = tabs
        .reorder_tabs(
            channel_id,
            OWNER,
            ReorderTabsRequest {
                tab_ids: vec![ids[2], ids[0], ids[1]],
            },
        )
        .await
        .unwrap();
    let names: Vec<&str> = reordered.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Links", "Docs", "Board"]);

    let err = tabs
        .reorder_tabs(
            channel_id,
            OWNER,
            ReorderTabsRequest {
                tab_ids: vec![ids[0], ids[0]],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_mutations_publish_events() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    MemberService::new(&h.ctx).leave_channel(channel_id, ALICE).await.unwrap();

    assert_eq!(
        h.events.names(),
        vec!["channel.created", "member.joined", "member.left"]
    );
}

#[tokio::test]
async fn test_publisher_failure_does_not_fail_operation() {
    let h = Harness::with_publisher(RecordingPublisher::failing());
    let channel_id = new_channel(&h, "general").await;

    add(&h, channel_id, ALICE, None).await;
    assert!(h.events.names().is_empty());
}

#[tokio::test]
async fn test_typing_indicator() {
    let h = Harness::new();
    let channel_id = new_channel(&h, "general").await;
    add(&h, channel_id, ALICE, None).await;
    let typing = TypingService::new(&h.ctx);

    typing.set_typing(channel_id, ALICE).await.unwrap();
    let response = typing.get_typing(channel_id, OWNER).await.unwrap();
    assert_eq!(response.user_ids, vec![ALICE]);

    let err = typing.set_typing(channel_id, BOB).await.unwrap_err();
    assert!(matches!(domain(&err), DomainError::NotMember));
}
