//! In-memory `ApiClient` that records every call

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiClient, ClientRef};
use crate::dto::{CreateInvite, CreateMessage, CreateRole, Overwrites};
use crate::entities::{Channel, Guild, Invite, Message, Role};
use crate::error::{ApiError, ApiResult};
use crate::value_objects::Snowflake;

/// Canned responses keyed by operation; anything unset answers with 404
#[derive(Default)]
pub(crate) struct FakeClient {
    pub roles: Option<Value>,
    pub channels: Option<Value>,
    pub guilds: Option<Value>,
    pub record: Option<Value>,
    calls: Mutex<Vec<(&'static str, Value)>>,
}

impl FakeClient {
    pub fn with_roles(roles: Value) -> Self {
        Self {
            roles: Some(roles),
            ..Self::default()
        }
    }

    pub fn with_channels(channels: Value) -> Self {
        Self {
            channels: Some(channels),
            ..Self::default()
        }
    }

    pub fn with_guilds(guilds: Value) -> Self {
        Self {
            guilds: Some(guilds),
            ..Self::default()
        }
    }

    pub fn with_record(record: Value) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    /// Number of times the named operation was invoked
    pub fn call_count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == op)
            .count()
    }

    /// Arguments recorded for the most recent call
    pub fn last_call(&self) -> Option<(&'static str, Value)> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record_call(&self, op: &'static str, args: Value) {
        self.calls.lock().unwrap().push((op, args));
    }

    fn canned(value: &Option<Value>) -> ApiResult<Value> {
        value.clone().ok_or(ApiError::Transport {
            status: 404,
            body: "{\"message\": \"Unknown\"}".to_string(),
        })
    }
}

#[async_trait]
impl ApiClient for FakeClient {
    async fn get_guild_roles(&self, guild_id: Snowflake) -> ApiResult<Vec<Role>> {
        self.record_call("get_guild_roles", serde_json::json!({"guild_id": guild_id}));
        tokio::task::yield_now().await;
        Role::from_records(Self::canned(&self.roles)?, ClientRef::none())
    }

    async fn get_guild_channels(&self, guild_id: Snowflake) -> ApiResult<Vec<Channel>> {
        self.record_call("get_guild_channels", serde_json::json!({"guild_id": guild_id}));
        tokio::task::yield_now().await;
        Channel::from_records(Self::canned(&self.channels)?, ClientRef::none())
    }

    async fn create_guild_role(&self, guild_id: Snowflake, role: &CreateRole) -> ApiResult<Role> {
        self.record_call(
            "create_guild_role",
            serde_json::json!({"guild_id": guild_id, "body": role}),
        );
        Role::from_record(Self::canned(&self.record)?, ClientRef::none())
    }

    async fn delete_guild(&self, guild_id: Snowflake) -> ApiResult<()> {
        self.record_call("delete_guild", serde_json::json!({"guild_id": guild_id}));
        Ok(())
    }

    async fn remove_guild_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ApiResult<()> {
        self.record_call(
            "remove_guild_member",
            serde_json::json!({"guild_id": guild_id, "user_id": user_id}),
        );
        Ok(())
    }

    async fn add_role_to_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()> {
        self.record_call(
            "add_role_to_guild_member",
            serde_json::json!({"guild_id": guild_id, "user_id": user_id, "role_id": role_id}),
        );
        Ok(())
    }

    async fn get_current_user_guilds(&self) -> ApiResult<Vec<Guild>> {
        self.record_call("get_current_user_guilds", Value::Null);
        tokio::task::yield_now().await;
        Guild::from_records(Self::canned(&self.guilds)?, ClientRef::none())
    }

    async fn modify_channel_overwrites(
        &self,
        channel_id: Snowflake,
        overwrites: &Overwrites,
    ) -> ApiResult<Channel> {
        self.record_call(
            "modify_channel_overwrites",
            serde_json::json!({"channel_id": channel_id, "body": overwrites}),
        );
        Channel::from_record(Self::canned(&self.record)?, ClientRef::none())
    }

    async fn create_channel_invite(
        &self,
        channel_id: Snowflake,
        invite: &CreateInvite,
    ) -> ApiResult<Invite> {
        self.record_call(
            "create_channel_invite",
            serde_json::json!({"channel_id": channel_id, "body": invite}),
        );
        Invite::from_record(Self::canned(&self.record)?, ClientRef::none())
    }

    async fn send_channel_message(
        &self,
        channel_id: Snowflake,
        message: &CreateMessage,
    ) -> ApiResult<Message> {
        self.record_call(
            "send_channel_message",
            serde_json::json!({"channel_id": channel_id, "body": message}),
        );
        Message::from_record(Self::canned(&self.record)?, ClientRef::none())
    }
}
