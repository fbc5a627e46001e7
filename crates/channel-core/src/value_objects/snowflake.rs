//! Snowflake identifiers for channel-owned records
//!
//! Layout, most significant bit first:
//! - 42 bits: milliseconds since [`Snowflake::EPOCH`]
//! - 10 bits: worker id
//! - 12 bits: per-millisecond sequence
//!
//! Ids sort by creation time, which keeps listings stable without a
//! secondary ordering column.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const TIMESTAMP_SHIFT: u32 = WORKER_BITS + SEQUENCE_BITS;

/// Largest accepted worker id
pub const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

/// 64-bit time-ordered identifier, serialized as a decimal string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2025-01-01T00:00:00Z in Unix milliseconds
    pub const EPOCH: i64 = 1_735_689_600_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Unix milliseconds at which the id was minted
    pub fn timestamp_ms(self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    pub fn worker_id(self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID)) as u16
    }

    /// Mint time; ids outside chrono's range clamp to the epoch
    pub fn created_at(self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp_ms())
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Parse a decimal id; surrounding whitespace is ignored
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SnowflakeParseError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| SnowflakeParseError::InvalidFormat(trimmed.to_string()))
    }
}

/// Error when parsing a Snowflake from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("snowflake id is empty")]
    Empty,
    #[error("invalid snowflake id: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Strings keep 64-bit ids exact for JSON clients that use doubles
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a snowflake id as a decimal string or integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Snowflake, E> {
                i64::try_from(v)
                    .map(Snowflake)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Snowflake, E> {
                Snowflake::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Lock-free id generator for one worker
///
/// The last timestamp and sequence share a single atomic word, so a
/// compare-and-swap claims both at once.
pub struct SnowflakeGenerator {
    worker_id: u16,
    /// `(ms since EPOCH) << SEQUENCE_BITS | sequence` of the last issued id
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` exceeds [`MAX_WORKER_ID`]
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        let mut current = self.state.load(Ordering::Acquire);
        loop {
            let now = Utc::now().timestamp_millis() - Snowflake::EPOCH;
            let last = current >> SEQUENCE_BITS;

            // A clock that steps backwards keeps issuing from the last tick
            let next = if now > last {
                now << SEQUENCE_BITS
            } else if current & SEQUENCE_MASK < SEQUENCE_MASK {
                current + 1
            } else {
                // Sequence exhausted for this tick; borrow the next millisecond
                (last + 1) << SEQUENCE_BITS
            };

            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let tick = next >> SEQUENCE_BITS;
                    let sequence = next & SEQUENCE_MASK;
                    return Snowflake(
                        (tick << TIMESTAMP_SHIFT)
                            | (i64::from(self.worker_id) << SEQUENCE_BITS)
                            | sequence,
                    );
                }
                Err(observed) => current = observed,
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
