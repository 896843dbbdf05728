//! Role entity - a named permission set within a guild

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use super::parse_record;
use crate::error::ApiResult;
use crate::traits::ClientRef;
use crate::value_objects::{Permissions, Snowflake};

/// Role entity
#[derive(Debug, Clone, Deserialize)]
pub struct Role {
    pub id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
    /// RGB color value, 0 for none
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub hoist: Option<bool>,
    /// Managed by an integration
    #[serde(default)]
    pub managed: Option<bool>,
    #[serde(default)]
    pub mentionable: Option<bool>,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

impl Role {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let mut role: Role = parse_record("role", record)?;
        role.client = client;
        Ok(role)
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let mut roles: Vec<Role> = parse_record("role", records)?;
        for role in &mut roles {
            role.client = client.clone();
        }
        Ok(roles)
    }

    /// Client this role was produced by
    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    /// Check whether the role grants a permission, honoring administrator
    #[inline]
    pub fn has_permission(&self, permission: Permissions) -> bool {
        self.permissions.has(permission)
    }

    /// Mention string for message content
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} #{}", name, self.id),
            None => write!(f, "#{}", self.id),
        }
    }
}
