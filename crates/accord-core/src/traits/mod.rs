//! Client port - the interface entities use to reach the server
//!
//! The domain layer defines what it needs from a client, and the transport
//! crate provides the implementation. Entities never own the client; they
//! hold a [`ClientRef`] that is checked on every use.

mod client_ref;
#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::dto::{CreateInvite, CreateMessage, CreateRole, Overwrites};
use crate::entities::{Channel, Guild, Invite, Message, Role};
use crate::error::ApiResult;
use crate::value_objects::Snowflake;

pub use client_ref::ClientRef;

/// Server operations reachable from entities
///
/// Returned entities that can act on the server are bound to the
/// implementing client.
#[async_trait]
pub trait ApiClient: Send + Sync {
    // ========================================================================
    // Guilds
    // ========================================================================

    /// Fetch the roles of a guild, in server order
    async fn get_guild_roles(&self, guild_id: Snowflake) -> ApiResult<Vec<Role>>;

    /// Fetch the channels of a guild, in server order
    async fn get_guild_channels(&self, guild_id: Snowflake) -> ApiResult<Vec<Channel>>;

    async fn create_guild_role(&self, guild_id: Snowflake, role: &CreateRole) -> ApiResult<Role>;

    async fn delete_guild(&self, guild_id: Snowflake) -> ApiResult<()>;

    /// Kick a member from a guild
    async fn remove_guild_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ApiResult<()>;

    async fn add_role_to_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Fetch the guilds the authenticated user belongs to
    async fn get_current_user_guilds(&self) -> ApiResult<Vec<Guild>>;

    // ========================================================================
    // Channels
    // ========================================================================

    /// Replace a channel's permission overwrites, returning the updated channel
    async fn modify_channel_overwrites(
        &self,
        channel_id: Snowflake,
        overwrites: &Overwrites,
    ) -> ApiResult<Channel>;

    async fn create_channel_invite(
        &self,
        channel_id: Snowflake,
        invite: &CreateInvite,
    ) -> ApiResult<Invite>;

    async fn send_channel_message(
        &self,
        channel_id: Snowflake,
        message: &CreateMessage,
    ) -> ApiResult<Message>;
}
