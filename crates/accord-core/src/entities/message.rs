//! Message entity - a message posted in a channel

use serde::Deserialize;
use serde_json::Value;

use super::{parse_record, User};
use crate::error::ApiResult;
use crate::traits::ClientRef;
use crate::value_objects::Snowflake;

/// Message entity
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub content: String,
    pub author: Option<User>,
    /// ISO8601 timestamp as sent by the server
    pub timestamp: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(skip)]
    pub(crate) client: ClientRef,
}

impl Message {
    pub fn from_record(record: Value, client: ClientRef) -> ApiResult<Self> {
        let mut message: Message = parse_record("message", record)?;
        message.bind(client);
        Ok(message)
    }

    pub fn from_records(records: Value, client: ClientRef) -> ApiResult<Vec<Self>> {
        let mut messages: Vec<Message> = parse_record("message", records)?;
        for message in &mut messages {
            message.bind(client.clone());
        }
        Ok(messages)
    }

    pub fn client(&self) -> &ClientRef {
        &self.client
    }

    fn bind(&mut self, client: ClientRef) {
        if let Some(author) = &mut self.author {
            author.client = client.clone();
        }
        self.client = client;
    }
}
