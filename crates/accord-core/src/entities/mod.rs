//! Domain entities - typed views of the records the REST API returns
//!
//! Every entity is built from a raw JSON record with `from_record` and
//! carries a [`ClientRef`](crate::traits::ClientRef) back to the client that
//! produced it. Required fields that are missing fail the conversion.

mod channel;
mod guild;
mod invite;
mod message;
mod overwrite;
mod role;
mod user;

pub use channel::{BaseChannel, Channel, ChannelType, TextChannel};
pub use guild::Guild;
pub use invite::Invite;
pub use message::Message;
pub use overwrite::{OverwriteType, PermissionOverwrite};
pub use role::Role;
pub use user::{CurrentUser, User};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Deserialize one record, tagging failures with the entity name
pub(crate) fn parse_record<T: DeserializeOwned>(entity: &'static str, record: Value) -> ApiResult<T> {
    serde_json::from_value(record).map_err(|e| ApiError::malformed(entity, e))
}
