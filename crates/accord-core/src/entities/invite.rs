//! Invite entity - a shareable code granting access to a guild channel

use serde::Deserialize;
use serde_json::Value;

use super::parse_record;
use crate::error::ApiResult;
use crate::traits::ClientRef;

const INVITE_BASE: &str = "https://discord.gg";

/// Invite entity
#[derive(Debug, Clone, Deserialize)]
pub struct Invite {
    pub code: String,
    pub uses: Option<u32>,
    pub max_uses: Option<u32>,
    /// Lifetime in seconds, 0 for never
    pub max_age: Option<u32>,
    pub temporary: Option<bool>,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

impl Invite {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let mut invite: Invite = parse_record("invite", record)?;
        invite.client = client;
        Ok(invite)
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let mut invites: Vec<Invite> = parse_record("invite", records)?;
        for invite in &mut invites {
            invite.client = client.clone();
        }
        Ok(invites)
    }

    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    /// Get the invite URL
    pub fn url(&self) -> String {
        format!("{INVITE_BASE}/{}", self.code)
    }

    /// Check if the invite has reached maximum uses
    ///
    /// Unknown when the server did not report usage.
    pub fn is_exhausted(&self) -> Option<bool> {
        match (self.uses, self.max_uses) {
            (_, Some(0)) => Some(false),
            (Some(uses), Some(max)) => Some(uses >= max),
            _ => None,
        }
    }
}
