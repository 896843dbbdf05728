//! # accord-core
//!
//! Domain layer containing entities, value objects, request DTOs and the client port.
//! This crate has zero dependencies on infrastructure (HTTP stack, logging backend, etc.).

pub mod dto;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use dto::{CreateGuild, CreateInvite, CreateMessage, CreateRole, Overwrites};
pub use entities::{
    BaseChannel, Channel, ChannelType, CurrentUser, Guild, Invite, Message, OverwriteType,
    PermissionOverwrite, Role, TextChannel, User,
};
pub use error::{ApiError, ApiResult};
pub use traits::{ApiClient, ClientRef};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
