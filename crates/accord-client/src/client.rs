//! REST client - one async method per API action
//!
//! Every operation funnels through [`Client::request`], which attaches the
//! default headers, maps non-2xx statuses to [`ApiError::Transport`], and
//! reports failures to the log sink.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, Level};
use validator::Validate;

use accord_common::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use accord_core::{
    ApiClient, ApiError, ApiResult, Channel, ClientRef, CreateGuild, CreateInvite, CreateMessage,
    CreateRole, CurrentUser, Guild, Invite, Message, Overwrites, PermissionOverwrite, Role,
    Snowflake,
};

use crate::logging::{LogSink, TracingSink};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::url::{api_base_url, DEFAULT_API_BASE_URL};

/// `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!(
    "DiscordBot (",
    env!("CARGO_PKG_NAME"),
    ", ",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Authenticated API client
///
/// Always handed out as `Arc<Client>`; entities it returns hold a weak
/// handle back to it.
pub struct Client {
    api_url: String,
    api_version: Option<u8>,
    headers: HeaderMap,
    transport: Arc<dyn HttpTransport>,
    log: Arc<dyn LogSink>,
    handle: Weak<Client>,
}

impl Client {
    /// Client with the default transport and log sink
    pub fn new(token: impl Into<String>, api_version: Option<u8>) -> ApiResult<Arc<Self>> {
        let mut builder = Self::builder(token);
        if let Some(version) = api_version {
            builder = builder.api_version(version);
        }
        builder.build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Arc<Self>> {
        let mut builder = Self::builder(config.token.clone())
            .base_url(config.base_url.clone())
            .timeout(config.timeout);
        if let Some(version) = config.api_version {
            builder = builder.api_version(version);
        }
        builder.build()
    }

    /// Root URL every path is appended to
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_version(&self) -> Option<u8> {
        self.api_version
    }

    /// Handle for entities produced by this client
    fn bound(&self) -> ClientRef {
        ClientRef::from_weak(self.handle.clone())
    }

    fn log(&self, level: Level, message: &str) {
        self.log.log(level, message);
    }

    /// Report a failed step to the log sink and hand the result back unchanged
    fn check<T>(&self, context: &str, result: ApiResult<T>) -> ApiResult<T> {
        result.inspect_err(|e| self.log(Level::ERROR, &format!("{context}: {e}")))
    }

    /// Issue a raw API call and return the parsed JSON body
    ///
    /// An empty success body (204) yields `Value::Null`.
    #[instrument(skip(self, body), fields(api_url = %self.api_url))]
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let request = HttpRequest {
            method: method.clone(),
            url: format!("{}{}", self.api_url, path),
            headers: self.headers.clone(),
            body,
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                self.log(Level::ERROR, &format!("{method} {path} failed: {e}"));
                return Err(e);
            }
        };

        if !response.is_success() {
            self.log(
                Level::ERROR,
                &format!("{method} {path} returned {}: {}", response.status, response.body),
            );
            return Err(ApiError::Transport {
                status: response.status,
                body: response.body,
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        self.check(
            &format!("{method} {path} returned an unreadable body"),
            serde_json::from_str(&response.body).map_err(|e| ApiError::malformed("response", e)),
        )
    }

    // ========================================================================
    // Guilds
    // ========================================================================

    /// Create a new guild owned by the bot
    pub async fn create_guild(&self, name: impl Into<String>) -> ApiResult<Guild> {
        let body = CreateGuild::new(name);
        self.check("Invalid guild", body.validate().map_err(ApiError::from))?;

        let record = self.request(Method::POST, "/guilds", Some(to_body(&body)?)).await?;
        let guild = self.check("Unexpected guild", Guild::from_record(record, self.bound()))?;

        self.log(Level::INFO, &format!("Guild created: {} ({})", guild.name, guild.id));
        Ok(guild)
    }

    pub async fn get_guild(&self, guild_id: impl Into<Snowflake>) -> ApiResult<Guild> {
        let guild_id = guild_id.into();
        let record = self
            .request(Method::GET, &format!("/guilds/{guild_id}"), None)
            .await?;
        let guild = self.check("Unexpected guild", Guild::from_record(record, self.bound()))?;

        self.log(Level::DEBUG, &format!("Got guild: {} ({})", guild.name, guild.id));
        Ok(guild)
    }

    /// Delete a guild; the bot must own it
    pub async fn delete_guild(&self, guild_id: impl Into<Snowflake>) -> ApiResult<()> {
        let guild_id = guild_id.into();
        self.request(Method::DELETE, &format!("/guilds/{guild_id}"), None)
            .await?;

        self.log(Level::INFO, &format!("Deleted guild with id: {guild_id}"));
        Ok(())
    }

    /// Kick a member from a guild
    pub async fn remove_guild_member(
        &self,
        guild_id: impl Into<Snowflake>,
        user_id: impl Into<Snowflake>,
    ) -> ApiResult<()> {
        let (guild_id, user_id) = (guild_id.into(), user_id.into());
        self.request(
            Method::DELETE,
            &format!("/guilds/{guild_id}/members/{user_id}"),
            None,
        )
        .await?;

        self.log(
            Level::INFO,
            &format!("Kicked guild member with id {user_id} from guild with id {guild_id}"),
        );
        Ok(())
    }

    // ========================================================================
    // Current User
    // ========================================================================

    pub async fn get_current_user(&self) -> ApiResult<CurrentUser> {
        let record = self.request(Method::GET, "/users/@me", None).await?;
        let user = self.check(
            "Unexpected current user",
            CurrentUser::from_record(record, self.bound()),
        )?;

        self.log(Level::DEBUG, &format!("Got current user: {}", user.id));
        Ok(user)
    }

    /// Guilds the bot belongs to
    pub async fn get_current_user_guilds(&self) -> ApiResult<Vec<Guild>> {
        let records = self.request(Method::GET, "/users/@me/guilds", None).await?;
        let guilds = self.check("Unexpected guild list", Guild::from_records(records, self.bound()))?;

        self.log(Level::DEBUG, &format!("Got {} current user guilds", guilds.len()));
        Ok(guilds)
    }

    // ========================================================================
    // Guild Roles
    // ========================================================================

    /// Create a role; only the fields set on `role` are sent
    pub async fn create_guild_role(
        &self,
        guild_id: impl Into<Snowflake>,
        role: &CreateRole,
    ) -> ApiResult<Role> {
        let guild_id = guild_id.into();
        let body = to_body(role)?;
        self.log(Level::DEBUG, &format!("Trying to create role with data: {body}"));

        let record = self
            .request(Method::POST, &format!("/guilds/{guild_id}/roles"), Some(body))
            .await?;
        let role = self.check("Unexpected role", Role::from_record(record, self.bound()))?;

        self.log(
            Level::INFO,
            &format!(
                "Created new guild role {} with snowflake: {}",
                role.name.as_deref().unwrap_or_default(),
                role.id
            ),
        );
        Ok(role)
    }

    pub async fn get_guild_roles(&self, guild_id: impl Into<Snowflake>) -> ApiResult<Vec<Role>> {
        let guild_id = guild_id.into();
        let records = self
            .request(Method::GET, &format!("/guilds/{guild_id}/roles"), None)
            .await?;
        let roles = self.check("Unexpected role list", Role::from_records(records, self.bound()))?;

        self.log(Level::DEBUG, &format!("Got {} roles for guild {guild_id}", roles.len()));
        Ok(roles)
    }

    pub async fn add_role_to_guild_member(
        &self,
        guild_id: impl Into<Snowflake>,
        user_id: impl Into<Snowflake>,
        role_id: impl Into<Snowflake>,
    ) -> ApiResult<()> {
        let (guild_id, user_id, role_id) = (guild_id.into(), user_id.into(), role_id.into());
        self.request(
            Method::PUT,
            &format!("/guilds/{guild_id}/members/{user_id}/roles/{role_id}"),
            None,
        )
        .await?;

        self.log(
            Level::INFO,
            &format!("Added role {role_id} to member {user_id} in guild {guild_id}"),
        );
        Ok(())
    }

    // ========================================================================
    // Channels
    // ========================================================================

    pub async fn get_guild_channels(
        &self,
        guild_id: impl Into<Snowflake>,
    ) -> ApiResult<Vec<Channel>> {
        let guild_id = guild_id.into();
        let records = self
            .request(Method::GET, &format!("/guilds/{guild_id}/channels"), None)
            .await?;
        let channels = self.check(
            "Unexpected channel list",
            Channel::from_records(records, self.bound()),
        )?;

        self.log(
            Level::DEBUG,
            &format!("Got {} channels for guild {guild_id}", channels.len()),
        );
        Ok(channels)
    }

    pub async fn get_channel(&self, channel_id: impl Into<Snowflake>) -> ApiResult<Channel> {
        let channel_id = channel_id.into();
        let record = self
            .request(Method::GET, &format!("/channels/{channel_id}"), None)
            .await?;

        self.log(Level::DEBUG, &format!("Got channel info: {record}"));
        self.check("Unexpected channel", Channel::from_record(record, self.bound()))
    }

    /// Post a message; content must be 1-2000 characters
    pub async fn send_channel_message(
        &self,
        channel_id: impl Into<Snowflake>,
        message: impl Into<CreateMessage>,
    ) -> ApiResult<Message> {
        let channel_id = channel_id.into();
        let body: CreateMessage = message.into();
        self.check("Invalid message", body.validate().map_err(ApiError::from))?;

        let record = self
            .request(
                Method::POST,
                &format!("/channels/{channel_id}/messages"),
                Some(to_body(&body)?),
            )
            .await?;
        let message = self.check("Unexpected message", Message::from_record(record, self.bound()))?;

        self.log(
            Level::INFO,
            &format!("Sent message {} to channel {channel_id}", message.id),
        );
        Ok(message)
    }

    /// Current permission overwrites of a channel, in server order
    pub async fn get_channel_overwrites(
        &self,
        channel_id: impl Into<Snowflake>,
    ) -> ApiResult<Vec<PermissionOverwrite>> {
        let channel = self.get_channel(channel_id).await?;
        Ok(channel.base().permission_overwrites.clone())
    }

    /// Replace a channel's permission overwrites
    ///
    /// A single overwrite is sent as a one-element array.
    pub async fn modify_channel_overwrites(
        &self,
        channel_id: impl Into<Snowflake>,
        overwrites: impl Into<Overwrites>,
    ) -> ApiResult<Channel> {
        let channel_id = channel_id.into();
        let overwrites: Overwrites = overwrites.into();
        let body = to_body(&overwrites)?;

        let record = self
            .request(Method::PATCH, &format!("/channels/{channel_id}"), Some(body))
            .await?;

        self.log(
            Level::DEBUG,
            &format!("Successfully modified channel overwrites. Channel now: {record}"),
        );
        self.check("Unexpected channel", Channel::from_record(record, self.bound()))
    }

    pub async fn get_channel_message(
        &self,
        channel_id: impl Into<Snowflake>,
        message_id: impl Into<Snowflake>,
    ) -> ApiResult<Message> {
        let (channel_id, message_id) = (channel_id.into(), message_id.into());
        let record = self
            .request(
                Method::GET,
                &format!("/channels/{channel_id}/messages/{message_id}"),
                None,
            )
            .await?;

        self.log(Level::DEBUG, &format!("Got message {message_id} in channel {channel_id}"));
        self.check("Unexpected message", Message::from_record(record, self.bound()))
    }

    /// Create an invite; only the fields set on `invite` are sent
    pub async fn create_channel_invite(
        &self,
        channel_id: impl Into<Snowflake>,
        invite: &CreateInvite,
    ) -> ApiResult<Invite> {
        let channel_id = channel_id.into();
        let record = self
            .request(
                Method::POST,
                &format!("/channels/{channel_id}/invites"),
                Some(to_body(invite)?),
            )
            .await?;
        let invite = self.check("Unexpected invite", Invite::from_record(record, self.bound()))?;

        self.log(
            Level::INFO,
            &format!("Created invite {} for channel {channel_id}", invite.code),
        );
        Ok(invite)
    }
}

fn to_body<T: Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::Validation(e.to_string()))
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ApiClient for Client {
    async fn get_guild_roles(&self, guild_id: Snowflake) -> ApiResult<Vec<Role>> {
        Client::get_guild_roles(self, guild_id).await
    }

    async fn get_guild_channels(&self, guild_id: Snowflake) -> ApiResult<Vec<Channel>> {
        Client::get_guild_channels(self, guild_id).await
    }

    async fn create_guild_role(&self, guild_id: Snowflake, role: &CreateRole) -> ApiResult<Role> {
        Client::create_guild_role(self, guild_id, role).await
    }

    async fn delete_guild(&self, guild_id: Snowflake) -> ApiResult<()> {
        Client::delete_guild(self, guild_id).await
    }

    async fn remove_guild_member(&self, guild_id: Snowflake, user_id: Snowflake) -> ApiResult<()> {
        Client::remove_guild_member(self, guild_id, user_id).await
    }

    async fn add_role_to_guild_member(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ApiResult<()> {
        Client::add_role_to_guild_member(self, guild_id, user_id, role_id).await
    }

    async fn get_current_user_guilds(&self) -> ApiResult<Vec<Guild>> {
        Client::get_current_user_guilds(self).await
    }

    async fn modify_channel_overwrites(
        &self,
        channel_id: Snowflake,
        overwrites: &Overwrites,
    ) -> ApiResult<Channel> {
        Client::modify_channel_overwrites(self, channel_id, overwrites.clone()).await
    }

    async fn create_channel_invite(
        &self,
        channel_id: Snowflake,
        invite: &CreateInvite,
    ) -> ApiResult<Invite> {
        Client::create_channel_invite(self, channel_id, invite).await
    }

    async fn send_channel_message(
        &self,
        channel_id: Snowflake,
        message: &CreateMessage,
    ) -> ApiResult<Message> {
        Client::send_channel_message(self, channel_id, message.clone()).await
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Configures a [`Client`] before construction
pub struct ClientBuilder {
    token: String,
    api_version: Option<u8>,
    base_url: String,
    timeout: Duration,
    transport: Option<Arc<dyn HttpTransport>>,
    log_sink: Option<Arc<dyn LogSink>>,
}

impl ClientBuilder {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_version: None,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport: None,
            log_sink: None,
        }
    }

    #[must_use]
    pub fn api_version(mut self, version: u8) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Override the API root, e.g. to point at a mock server
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request timeout for the default transport; ignored with a custom transport
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn log_sink(mut self, log_sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(log_sink);
        self
    }

    pub fn build(self) -> ApiResult<Arc<Client>> {
        // Accept tokens pasted with their scheme prefix
        let token = self.token.trim();
        let token = token.strip_prefix("Bot ").unwrap_or(token);
        if token.is_empty() {
            return Err(ApiError::InvalidConfig("bot token is empty".to_string()));
        }

        let mut authorization = HeaderValue::from_str(&format!("Bot {token}"))
            .map_err(|_| ApiError::InvalidConfig("bot token is not a valid header value".to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };
        let log = self.log_sink.unwrap_or_else(|| Arc::new(TracingSink));
        let api_url = api_base_url(&self.base_url, self.api_version);
        let api_version = self.api_version;

        Ok(Arc::new_cyclic(|handle| Client {
            api_url,
            api_version,
            headers,
            transport,
            log,
            handle: handle.clone(),
        }))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
