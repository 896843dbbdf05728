//! User entities - any account, and the account the client is authenticated as

use std::ops::Deref;

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::{parse_record, Guild};
use crate::error::ApiResult;
use crate::traits::ClientRef;
use crate::value_objects::Snowflake;

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// User entity
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: Snowflake,
    pub username: Option<String>,
    pub discriminator: Option<String>,
    /// Avatar hash
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

impl User {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let mut user: User = parse_record("user", record)?;
        user.client = client;
        Ok(user)
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let mut users: Vec<User> = parse_record("user", records)?;
        for user in &mut users {
            user.client = client.clone();
        }
        Ok(users)
    }

    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    /// Get the full tag: username#discriminator
    ///
    /// Accounts migrated off discriminators report `"0"`; those render as the
    /// bare username.
    pub fn tag(&self) -> Option<String> {
        let username = self.username.as_deref()?;
        match self.discriminator.as_deref() {
            Some(d) if d != "0" => Some(format!("{username}#{d}")),
            _ => Some(username.to_string()),
        }
    }

    /// Get avatar URL or default avatar URL
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => format!("{CDN_BASE}/avatars/{}/{}.png", self.id, hash),
            None => format!("{CDN_BASE}/embed/avatars/{}.png", self.default_avatar_index()),
        }
    }

    /// Mention string for message content
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    fn default_avatar_index(&self) -> u64 {
        match self.discriminator.as_deref().map(str::parse::<u64>) {
            Some(Ok(d)) if d != 0 => d % 5,
            _ => (self.id.get() >> 22) % 6,
        }
    }
}

/// The authenticated account
///
/// Same data as [`User`]; additionally reaches "my guilds" through the
/// client back-reference.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    user: User,
    guilds: OnceCell<Vec<Guild>>,
}

impl CurrentUser {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        Ok(Self {
            user: User::from_record(record, client)?,
            guilds: OnceCell::new(),
        })
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        Ok(User::from_records(records, client)?
            .into_iter()
            .map(|user| Self {
                user,
                guilds: OnceCell::new(),
            })
            .collect())
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }

    /// Guilds the account belongs to, fetched on first access
    pub async fn guilds(&self) -> ApiResult<&[Guild]> {
        self.guilds
            .get_or_try_init(|| async {
                self.user.client.get()?.get_current_user_guilds().await
            })
            .await
            .map(Vec::as_slice)
    }

    /// Guilds if already fetched, without any I/O
    pub fn guilds_cached(&self) -> Option<&[Guild]> {
        self.guilds.get().map(Vec::as_slice)
    }

    /// Re-fetch the guild list, replacing the cache
    pub async fn refresh_guilds(&mut self) -> ApiResult<&[Guild]> {
        let guilds = self.user.client.get()?.get_current_user_guilds().await?;
        self.guilds = OnceCell::new_with(Some(guilds));
        Ok(self.guilds_cached().unwrap_or_default())
    }
}

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.user
    }
}
