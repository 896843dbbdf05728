//! Request DTOs for client operations
//!
//! DTOs with platform limits implement `Validate`; the client checks them
//! before any request is issued.

use serde::Serialize;
use validator::Validate;

use crate::entities::PermissionOverwrite;
use crate::value_objects::Permissions;

// ============================================================================
// Guild Requests
// ============================================================================

/// Create guild request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateGuild {
    #[validate(length(min = 2, max = 100, message = "Guild name must be 2-100 characters"))]
    pub name: String,
}

impl CreateGuild {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ============================================================================
// Role Requests
// ============================================================================

/// Create role request, every field optional
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,

    /// RGB color value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    /// Display members of this role separately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoist: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentionable: Option<bool>,
}

impl CreateRole {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn hoist(mut self, hoist: bool) -> Self {
        self.hoist = Some(hoist);
        self
    }

    #[must_use]
    pub fn mentionable(mut self, mentionable: bool) -> Self {
        self.mentionable = Some(mentionable);
        self
    }
}

// ============================================================================
// Channel Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateMessage {
    #[validate(length(min = 1, max = 2000, message = "Message content must be 1-2000 characters"))]
    pub content: String,
}

impl CreateMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl From<&str> for CreateMessage {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for CreateMessage {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Create invite request; the server applies its defaults for omitted fields
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInvite {
    /// Lifetime in seconds, 0 for never
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,

    /// Maximum uses, 0 for unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,

    /// Grant temporary membership only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
}

impl CreateInvite {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(seconds);
        self
    }

    #[must_use]
    pub fn max_uses(mut self, uses: u32) -> Self {
        self.max_uses = Some(uses);
        self
    }

    #[must_use]
    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = Some(temporary);
        self
    }

    #[must_use]
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }
}

/// Replacement set of channel permission overwrites
///
/// Always serialized as an array, even when built from a single overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overwrites {
    pub permission_overwrites: Vec<PermissionOverwrite>,
}

impl From<PermissionOverwrite> for Overwrites {
    fn from(overwrite: PermissionOverwrite) -> Self {
        Self {
            permission_overwrites: vec![overwrite],
        }
    }
}

impl From<Vec<PermissionOverwrite>> for Overwrites {
    fn from(permission_overwrites: Vec<PermissionOverwrite>) -> Self {
        Self {
            permission_overwrites,
        }
    }
}

impl From<&[PermissionOverwrite]> for Overwrites {
    fn from(overwrites: &[PermissionOverwrite]) -> Self {
        Self {
            permission_overwrites: overwrites.to_vec(),
        }
    }
}
