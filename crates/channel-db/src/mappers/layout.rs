//! Tab, link, section, and template mappers

use channel_core::{ChannelLink, ChannelTab, ChannelTemplate, ChannelType, LinkType, Section, Snowflake};

use crate::models::{LinkModel, SectionModel, TabModel, TemplateModel};

impl From<TabModel> for ChannelTab {
    fn from(model: TabModel) -> Self {
        ChannelTab {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            name: model.name,
            tab_type: model.tab_type,
            config: model.config,
            position: model.position,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LinkModel> for ChannelLink {
    fn from(model: LinkModel) -> Self {
        ChannelLink {
            id: Snowflake::new(model.id),
            source_channel_id: Snowflake::new(model.source_channel_id),
            target_channel_id: Snowflake::new(model.target_channel_id),
            created_by: Snowflake::new(model.created_by),
            link_type: LinkType::from(model.link_type.as_str()),
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SectionModel> for Section {
    fn from(model: SectionModel) -> Self {
        Section {
            id: Snowflake::new(model.id),
            workspace_id: Snowflake::new(model.workspace_id),
            user_id: Snowflake::new(model.user_id),
            name: model.name,
            position: model.position,
            is_collapsed: model.is_collapsed,
            channel_ids: model.channel_ids.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<TemplateModel> for ChannelTemplate {
    fn from(model: TemplateModel) -> Self {
        ChannelTemplate {
            id: Snowflake::new(model.id),
            workspace_id: Snowflake::new(model.workspace_id),
            name: model.name,
            description: model.description,
            channel_type: ChannelType::from(model.channel_type.as_str()),
            topic: model.topic,
            settings: model.settings,
            use_count: model.use_count,
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
