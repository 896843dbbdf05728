//! Guild entity - a server, with lazily fetched roles and channels

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::{parse_record, Channel, Role};
use crate::dto::CreateRole;
use crate::error::ApiResult;
use crate::traits::ClientRef;
use crate::value_objects::{Permissions, Snowflake};

const CDN_BASE: &str = "https://cdn.discordapp.com";

#[derive(Deserialize)]
struct GuildRecord {
    id: Snowflake,
    name: String,
    icon: Option<String>,
    owner_id: Option<Snowflake>,
    public_updates_channel_id: Option<Snowflake>,
    owner: Option<bool>,
    permissions: Option<Permissions>,
    roles: Option<Value>,
}

/// Guild (server) entity
///
/// `roles` and `channels` start unfetched unless the record carried them.
/// An unfetched cache is fetched on first access; a fetched one, even if
/// empty, is returned as is until refreshed.
#[derive(Debug, Clone)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    /// Icon hash
    pub icon: Option<String>,
    pub owner_id: Option<Snowflake>,
    pub public_updates_channel_id: Option<Snowflake>,
    /// Whether the current user owns the guild (guild-list records only)
    pub owner: Option<bool>,
    /// The current user's permissions in the guild (guild-list records only)
    pub permissions: Option<Permissions>,
    roles: OnceCell<Vec<Role>>,
    channels: OnceCell<Vec<Channel>>,
    client: ClientRef,
}

impl Guild {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let record: GuildRecord = parse_record("guild", record)?;
        let roles = match record.roles {
            Some(roles) => Some(Role::from_records(roles, client.clone())?),
            None => None,
        };

        Ok(Self {
            id: record.id,
            name: record.name,
            icon: record.icon,
            owner_id: record.owner_id,
            public_updates_channel_id: record.public_updates_channel_id,
            owner: record.owner,
            permissions: record.permissions,
            roles: OnceCell::new_with(roles),
            channels: OnceCell::new(),
            client,
        })
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let records: Vec<Value> = parse_record("guild", records)?;
        records
            .into_iter()
            .map(|record| Self::from_record(record, client.clone()))
            .collect()
    }

    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    /// Check if a user is the guild owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == Some(user_id)
    }

    /// Get the guild icon URL if set
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("{CDN_BASE}/icons/{}/{}.png", self.id, hash))
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// Roles in server order, fetched on first access
    pub async fn roles(&self) -> ApiResult<&[Role]> {
        self.roles
            .get_or_try_init(|| async { self.client.get()?.get_guild_roles(self.id).await })
            .await
            .map(Vec::as_slice)
    }

    /// Roles if already fetched, without any I/O
    pub fn roles_cached(&self) -> Option<&[Role]> {
        self.roles.get().map(Vec::as_slice)
    }

    /// Re-fetch roles, replacing the cache
    pub async fn refresh_roles(&mut self) -> ApiResult<&[Role]> {
        let roles = self.client.get()?.get_guild_roles(self.id).await?;
        self.roles = OnceCell::new_with(Some(roles));
        Ok(self.roles_cached().unwrap_or_default())
    }

    /// Create a role in this guild
    ///
    /// The roles cache is not touched; call [`Guild::refresh_roles`] to see it.
    pub async fn create_role(&self, role: CreateRole) -> ApiResult<Role> {
        self.client.get()?.create_guild_role(self.id, &role).await
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Channels in server order, fetched on first access
    pub async fn channels(&self) -> ApiResult<&[Channel]> {
        self.channels
            .get_or_try_init(|| async { self.client.get()?.get_guild_channels(self.id).await })
            .await
            .map(Vec::as_slice)
    }

    /// Channels if already fetched, without any I/O
    pub fn channels_cached(&self) -> Option<&[Channel]> {
        self.channels.get().map(Vec::as_slice)
    }

    /// Re-fetch channels, replacing the cache
    pub async fn refresh_channels(&mut self) -> ApiResult<&[Channel]> {
        let channels = self.client.get()?.get_guild_channels(self.id).await?;
        self.channels = OnceCell::new_with(Some(channels));
        Ok(self.channels_cached().unwrap_or_default())
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// Kick a member from this guild
    pub async fn remove_member(&self, user_id: impl Into<Snowflake>) -> ApiResult<()> {
        self.client
            .get()?
            .remove_guild_member(self.id, user_id.into())
            .await
    }

    /// Grant a role to a member of this guild
    pub async fn add_member_role(
        &self,
        user_id: impl Into<Snowflake>,
        role_id: impl Into<Snowflake>,
    ) -> ApiResult<()> {
        self.client
            .get()?
            .add_role_to_guild_member(self.id, user_id.into(), role_id.into())
            .await
    }

    /// Delete this guild; the bot must own it
    pub async fn delete(&self) -> ApiResult<()> {
        self.client.get()?.delete_guild(self.id).await
    }
}
