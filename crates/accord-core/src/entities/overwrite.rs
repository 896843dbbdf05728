//! Channel permission overwrites

use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Target kind of an overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum OverwriteType {
    Role,
    Member,
    /// A target kind this crate does not name, kept so the record round-trips
    Unknown(u8),
}

impl From<u8> for OverwriteType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Role,
            1 => Self::Member,
            other => Self::Unknown(other),
        }
    }
}

impl From<OverwriteType> for u8 {
    fn from(kind: OverwriteType) -> Self {
        match kind {
            OverwriteType::Role => 0,
            OverwriteType::Member => 1,
            OverwriteType::Unknown(code) => code,
        }
    }
}

/// Allow/deny pair applied to a role or member on one channel
///
/// Wire shape: `{"id": "10", "type": 0, "allow": "8", "deny": "0"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    /// Role or user ID the overwrite targets
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: OverwriteType,
    #[serde(default)]
    pub allow: Permissions,
    #[serde(default)]
    pub deny: Permissions,
}

impl PermissionOverwrite {
    pub fn new(id: Snowflake, kind: OverwriteType, allow: Permissions, deny: Permissions) -> Self {
        Self {
            id,
            kind,
            allow,
            deny,
        }
    }

    pub fn role(id: impl Into<Snowflake>, allow: Permissions, deny: Permissions) -> Self {
        Self::new(id.into(), OverwriteType::Role, allow, deny)
    }

    pub fn member(id: impl Into<Snowflake>, allow: Permissions, deny: Permissions) -> Self {
        Self::new(id.into(), OverwriteType::Member, allow, deny)
    }

    /// Apply this overwrite to a base permission set
    pub fn apply(&self, base: Permissions) -> Permissions {
        (base & !self.deny) | self.allow
    }
}
