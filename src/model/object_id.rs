//! ObjectId value object for opaque Pokemon identifiers.
//!
//! Ids are assigned by the storage backend at creation time and never change.
//! They are 12 bytes, rendered as 24 lowercase hexadecimal characters:
//!
//! | bytes | content |
//! |-------|---------|
//! | 0..4  | seconds since the Unix epoch, big-endian |
//! | 4..9  | random value, unique per process |
//! | 9..12 | wrapping counter, big-endian, random start |
//!
//! ## Examples
//!
//! ```rust
//! use pokedex::model::ObjectId;
//!
//! let id = ObjectId::new();
//! let parsed: ObjectId = id.to_hex().parse().unwrap();
//! assert_eq!(id, parsed);
//!
//! assert!(ObjectId::is_valid("507f1f77bcf86cd799439011"));
//! assert!(!ObjectId::is_valid("pikachu"));
//! ```

use crate::error::ObjectIdError;
use chrono::{DateTime, Utc};
use hex::FromHexError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(|| {
    let random = uuid::Uuid::new_v4();
    let mut bytes = [0u8; 5];
    bytes.copy_from_slice(&random.as_bytes()[..5]);
    bytes
});

static COUNTER: LazyLock<AtomicU32> = LazyLock::new(|| {
    let random = uuid::Uuid::new_v4();
    let b = random.as_bytes();
    AtomicU32::new(u32::from_be_bytes([0, b[0], b[1], b[2]]))
});

/// A 12-byte opaque identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Number of characters in the textual form.
    pub const HEX_LEN: usize = 24;

    /// Generate a fresh id.
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Construct an id from raw bytes.
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse the 24-character hex form. Uppercase digits are accepted.
    pub fn parse_str(value: &str) -> Result<Self, ObjectIdError> {
        if value.len() != Self::HEX_LEN {
            return Err(ObjectIdError::InvalidLength {
                length: value.chars().count(),
            });
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(value, &mut bytes).map_err(|e| match e {
            FromHexError::InvalidHexCharacter { c, index } => {
                ObjectIdError::InvalidCharacter { character: c, index }
            }
            _ => ObjectIdError::InvalidLength {
                length: value.chars().count(),
            },
        })?;

        Ok(Self(bytes))
    }

    /// Whether `value` has the opaque id format.
    pub fn is_valid(value: &str) -> bool {
        value.len() == Self::HEX_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creation second embedded in the id.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        DateTime::from_timestamp(seconds as i64, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse_str(&value).map_err(serde::de::Error::custom)
    }
}
