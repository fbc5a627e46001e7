//! Webhook, permission, settings, announcement, and activity log mappers

use channel_core::{
    ActivityLogEntry, Announcement, AnnouncementPriority, ChannelSettings, NotificationLevel,
    PermissionOverride, PermissionTarget, Snowflake, Webhook,
};

use crate::models::{ActivityLogModel, AnnouncementModel, PermissionModel, SettingsModel, WebhookModel};

impl From<WebhookModel> for Webhook {
    fn from(model: WebhookModel) -> Self {
        Webhook {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            name: model.name,
            url: model.url,
            avatar_url: model.avatar_url,
            events: model.events.0,
            is_active: model.is_active,
            created_by: Snowflake::new(model.created_by),
            last_triggered_at: model.last_triggered_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<PermissionModel> for PermissionOverride {
    fn from(model: PermissionModel) -> Self {
        PermissionOverride {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            permission_type: model.permission_type,
            target_type: PermissionTarget::from(model.target_type.as_str()),
            target_id: model.target_id,
            allow: model.allow,
            deny: model.deny,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SettingsModel> for ChannelSettings {
    fn from(model: SettingsModel) -> Self {
        ChannelSettings {
            channel_id: Snowflake::new(model.channel_id),
            slow_mode_interval: model.slow_mode_interval,
            max_pins: model.max_pins,
            max_bookmarks: model.max_bookmarks,
            allow_threads: model.allow_threads,
            allow_reactions: model.allow_reactions,
            allow_invites: model.allow_invites,
            auto_archive_days: model.auto_archive_days,
            default_notification: NotificationLevel::from(model.default_notification.as_str()),
            custom_emoji: model.custom_emoji,
            link_previews: model.link_previews,
            member_limit: model.member_limit,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<AnnouncementModel> for Announcement {
    fn from(model: AnnouncementModel) -> Self {
        Announcement {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            title: model.title,
            content: model.content,
            priority: AnnouncementPriority::from(model.priority.as_str()),
            author_id: Snowflake::new(model.author_id),
            is_pinned: model.is_pinned,
            expires_at: model.expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ActivityLogModel> for ActivityLogEntry {
    fn from(model: ActivityLogModel) -> Self {
        ActivityLogEntry {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            action: model.action,
            target_id: model.target_id,
            details: model.details,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use channel_core::WebhookEvent;
    use chrono::Utc;
    use sqlx::types::Json;
    use std::collections::BTreeSet;

    #[test]
    fn test_webhook_events_from_json_column() {
        let now = Utc::now();
        let events: BTreeSet<WebhookEvent> =
            [WebhookEvent::MemberJoined, WebhookEvent::PollCreated].into_iter().collect();

        let webhook = Webhook::from(WebhookModel {
            id: 1,
            channel_id: 2,
            name: "ci".to_string(),
            url: "https://hooks.example.com/ci".to_string(),
            avatar_url: None,
            events: Json(events),
            is_active: true,
            created_by: 3,
            last_triggered_at: None,
            created_at: now,
            updated_at: now,
        });

        assert!(webhook.subscribes_to(WebhookEvent::MemberJoined));
        assert!(!webhook.subscribes_to(WebhookEvent::MessageDeleted));
    }

    #[test]
    fn test_settings_notification_level() {
        let now = Utc::now();
        let settings = ChannelSettings::from(SettingsModel {
            channel_id: 5,
            slow_mode_interval: 10,
            max_pins: 50,
            max_bookmarks: 100,
            allow_threads: true,
            allow_reactions: false,
            allow_invites: true,
            auto_archive_days: 0,
            default_notification: "none".to_string(),
            custom_emoji: false,
            link_previews: true,
            member_limit: 0,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(settings.default_notification, NotificationLevel::None);
        assert_eq!(settings.slow_mode_interval, 10);
        assert!(!settings.allow_reactions);
    }
}
