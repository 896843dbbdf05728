//! Request bodies sent to the REST API
//!
//! Optional fields are omitted from the JSON entirely when unset, so every
//! request carries only what the caller supplied.

mod requests;

pub use requests::{CreateGuild, CreateInvite, CreateMessage, CreateRole, Overwrites};
