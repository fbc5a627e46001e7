//! Section entity - a user's private sidebar grouping of channels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Sidebar section, owned by exactly one user within a workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: Snowflake,
    pub workspace_id: Snowflake,
    pub user_id: Snowflake,
    pub name: String,
    pub position: i32,
    pub is_collapsed: bool,
    pub channel_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Section {
    pub fn new(
        id: Snowflake,
        workspace_id: Snowflake,
        user_id: Snowflake,
        name: String,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            workspace_id,
            user_id,
            name,
            position,
            is_collapsed: false,
            channel_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the channel list, dropping duplicates while keeping order
    pub fn set_channels(&mut self, channel_ids: Vec<Snowflake>) {
        let mut seen = std::collections::HashSet::new();
        self.channel_ids = channel_ids.into_iter().filter(|id| seen.insert(*id)).collect();
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_channels_deduplicates() {
        let mut section = Section::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "Projects".to_string(),
            1,
        );
        section.set_channels(vec![
            Snowflake::new(10),
            Snowflake::new(11),
            Snowflake::new(10),
        ]);
        assert_eq!(section.channel_ids, vec![Snowflake::new(10), Snowflake::new(11)]);
        assert!(section.is_owned_by(Snowflake::new(3)));
    }
}
