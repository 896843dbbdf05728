//! Channel entities - a shared base record resolved to a concrete variant
//!
//! [`Channel::from_record`] reads the `type` discriminator once and picks the
//! variant. Unknown codes fall back to the generic base channel so new
//! platform channel kinds never fail deserialization.

use std::ops::Deref;

use serde::Deserialize;
use serde_json::Value;

use super::{parse_record, Invite, Message, PermissionOverwrite};
use crate::dto::{CreateInvite, CreateMessage, Overwrites};
use crate::error::ApiResult;
use crate::traits::ClientRef;
use crate::value_objects::Snowflake;

/// Channel type codes known to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    GuildText,
    Dm,
    GuildVoice,
    GroupDm,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    GuildMedia,
    /// A code this crate does not name
    Unknown(i64),
}

impl ChannelType {
    /// Get the numeric value
    #[inline]
    #[must_use]
    pub fn code(self) -> i64 {
        i64::from(self)
    }
}

impl From<i64> for ChannelType {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Dm,
            2 => Self::GuildVoice,
            3 => Self::GroupDm,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            16 => Self::GuildMedia,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChannelType> for i64 {
    fn from(ct: ChannelType) -> Self {
        match ct {
            ChannelType::GuildText => 0,
            ChannelType::Dm => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::GroupDm => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::AnnouncementThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::GuildDirectory => 14,
            ChannelType::GuildForum => 15,
            ChannelType::GuildMedia => 16,
            ChannelType::Unknown(code) => code,
        }
    }
}

#[derive(Deserialize)]
struct ChannelRecord {
    id: Snowflake,
    guild_id: Option<Snowflake>,
    name: Option<String>,
    position: Option<i32>,
    #[serde(rename = "type")]
    type_code: i64,
    #[serde(default)]
    permission_overwrites: Vec<PermissionOverwrite>,
}

/// Fields and actions shared by every channel kind
#[derive(Debug, Clone)]
pub struct BaseChannel {
    pub id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub name: Option<String>,
    pub position: Option<i32>,
    /// Server order
    pub permission_overwrites: Vec<PermissionOverwrite>,
    type_code: i64,
    client: ClientRef,
}

impl BaseChannel {
    /// Raw discriminator the channel was built from
    #[inline]
    #[must_use]
    pub fn type_code(&self) -> i64 {
        self.type_code
    }

    #[inline]
    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        ChannelType::from(self.type_code)
    }

    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    /// Check if this is a guild channel
    #[inline]
    #[must_use]
    pub fn is_guild_channel(&self) -> bool {
        self.guild_id.is_some()
    }

    /// Replace this channel's permission overwrites on the server
    ///
    /// Accepts one overwrite or a sequence; the local record is left as is
    /// and the updated channel is returned.
    pub async fn modify_overwrites(&self, overwrites: impl Into<Overwrites>) -> ApiResult<Channel> {
        let overwrites = overwrites.into();
        self.client
            .get()?
            .modify_channel_overwrites(self.id, &overwrites)
            .await
    }
}

/// Guild text channel
#[derive(Debug, Clone)]
pub struct TextChannel {
    base: BaseChannel,
}

impl TextChannel {
    pub fn base(&self) -> &BaseChannel {
        &self.base
    }

    /// Create an invite to this channel
    pub async fn create_invite(&self, invite: CreateInvite) -> ApiResult<Invite> {
        self.base
            .client
            .get()?
            .create_channel_invite(self.base.id, &invite)
            .await
    }

    /// Post a message to this channel
    pub async fn send_message(&self, message: impl Into<CreateMessage>) -> ApiResult<Message> {
        let message = message.into();
        self.base
            .client
            .get()?
            .send_channel_message(self.base.id, &message)
            .await
    }
}

impl Deref for TextChannel {
    type Target = BaseChannel;

    fn deref(&self) -> &BaseChannel {
        &self.base
    }
}

/// A channel resolved to its concrete kind
#[derive(Debug, Clone)]
pub enum Channel {
    Text(TextChannel),
    /// Any kind without a dedicated variant, including unknown codes
    Generic(BaseChannel),
}

impl Channel {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let record: ChannelRecord = parse_record("channel", record)?;
        let base = BaseChannel {
            id: record.id,
            guild_id: record.guild_id,
            name: record.name,
            position: record.position,
            permission_overwrites: record.permission_overwrites,
            type_code: record.type_code,
            client,
        };

        Ok(match base.channel_type() {
            ChannelType::GuildText => Self::Text(TextChannel { base }),
            _ => Self::Generic(base),
        })
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let records: Vec<Value> = parse_record("channel", records)?;
        records
            .into_iter()
            .map(|record| Self::from_record(record, client.clone()))
            .collect()
    }

    pub fn base(&self) -> &BaseChannel {
        match self {
            Self::Text(text) => &text.base,
            Self::Generic(base) => base,
        }
    }

    #[inline]
    pub fn id(&self) -> Snowflake {
        self.base().id
    }

    pub fn name(&self) -> Option<&str> {
        self.base().name.as_deref()
    }

    #[inline]
    pub fn guild_id(&self) -> Option<Snowflake> {
        self.base().guild_id
    }

    #[inline]
    pub fn type_code(&self) -> i64 {
        self.base().type_code()
    }

    pub fn as_text(&self) -> Option<&TextChannel> {
        match self {
            Self::Text(text) => Some(text),
            Self::Generic(_) => None,
        }
    }

    pub fn into_text(self) -> Option<TextChannel> {
        match self {
            Self::Text(text) => Some(text),
            Self::Generic(_) => None,
        }
    }

    /// Check if this is a text channel
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}
