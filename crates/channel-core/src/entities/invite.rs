//! Invite entity - a redeemable code granting channel membership

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Length of generated invite codes
pub const INVITE_CODE_LEN: usize = 8;

/// Invite entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub created_by: Snowflake,
    pub code: String,
    /// Zero means unlimited
    pub max_uses: i32,
    pub use_count: i32,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Invite {
    /// Create a new active invite
    pub fn new(id: Snowflake, channel_id: Snowflake, created_by: Snowflake, code: String) -> Self {
        Self {
            id,
            channel_id,
            created_by,
            code,
            max_uses: 0,
            use_count: 0,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Limit the number of redemptions (0 or less is unlimited)
    pub fn with_max_uses(mut self, max_uses: i32) -> Self {
        self.max_uses = max_uses.max(0);
        self
    }

    /// Set an expiry timestamp
    pub fn with_expires_at(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Check if invite is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Check if invite is expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check if invite has reached max uses
    pub fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.use_count >= self.max_uses
    }

    /// Check if invite can still be redeemed
    pub fn is_valid(&self) -> bool {
        self.is_active && !self.is_expired() && !self.is_exhausted()
    }

    /// Get remaining uses (None if unlimited)
    pub fn remaining_uses(&self) -> Option<i32> {
        (self.max_uses > 0).then(|| (self.max_uses - self.use_count).max(0))
    }
}

/// Generate a random alphanumeric invite code
pub fn generate_invite_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invite() -> Invite {
        Invite::new(
            Snowflake::new(1),
            Snowflake::new(100),
            Snowflake::new(300),
            "abc12345".to_string(),
        )
    }

    #[test]
    fn test_invite_creation() {
        let invite = invite();
        assert!(invite.is_active);
        assert!(invite.is_valid());
        assert!(!invite.is_expired());
        assert!(!invite.is_exhausted());
        assert_eq!(invite.remaining_uses(), None);
    }

    #[test]
    fn test_invite_with_max_uses() {
        let mut invite = invite().with_max_uses(2);
        assert_eq!(invite.remaining_uses(), Some(2));

        invite.use_count = 1;
        assert!(invite.is_valid());

        invite.use_count = 2;
        assert!(invite.is_exhausted());
        assert!(!invite.is_valid());
        assert_eq!(invite.remaining_uses(), Some(0));
    }

    #[test]
    fn test_negative_max_uses_is_unlimited() {
        let invite = invite().with_max_uses(-5);
        assert_eq!(invite.max_uses, 0);
        assert!(!invite.is_exhausted());
    }

    #[test]
    fn test_invite_expiry() {
        let invite = invite().with_expires_at(Some(Utc::now() - Duration::minutes(1)));
        assert!(invite.is_expired());
        assert!(!invite.is_valid());

        let invite = invite.with_expires_at(Some(Utc::now() + Duration::hours(1)));
        assert!(!invite.is_expired());
    }

    #[test]
    fn test_inactive_invite_is_invalid() {
        let mut invite = invite();
        invite.is_active = false;
        assert!(!invite.is_valid());
    }

    #[test]
    fn test_generate_invite_code() {
        let code1 = generate_invite_code();
        let code2 = generate_invite_code();

        assert_eq!(code1.len(), INVITE_CODE_LEN);
        assert_eq!(code2.len(), INVITE_CODE_LEN);
        assert!(code1.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
