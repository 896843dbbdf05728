//! Test fixtures and data generators
//!
//! Wire records shaped like the platform's responses.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A snowflake-sized ID unique within the test run
pub fn unique_id() -> u64 {
    ((1_462_015_105_796 - 1_420_070_400_000) << 22) | unique_suffix()
}

pub fn guild_record(id: u64, name: &str) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "icon": null,
        "owner_id": "80351110224678912",
        "public_updates_channel_id": null
    })
}

pub fn role_record(id: u64, name: &str, permissions: &str) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "position": 1,
        "permissions": permissions,
        "managed": false,
        "mentionable": false
    })
}

pub fn channel_record(id: u64, guild_id: u64, name: &str, type_code: u8) -> Value {
    json!({
        "id": id.to_string(),
        "guild_id": guild_id.to_string(),
        "name": name,
        "type": type_code,
        "position": 0,
        "permission_overwrites": []
    })
}

pub fn user_record(id: u64, username: &str) -> Value {
    json!({
        "id": id.to_string(),
        "username": username,
        "discriminator": "0001",
        "avatar": null,
        "bot": true
    })
}

pub fn message_record(id: u64, channel_id: u64, content: &str) -> Value {
    json!({
        "id": id.to_string(),
        "channel_id": channel_id.to_string(),
        "content": content,
        "author": user_record(80_351_110_224_678_912, "bot"),
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "pinned": false
    })
}

pub fn invite_record(code: &str) -> Value {
    json!({
        "code": code,
        "uses": 0,
        "max_uses": 0,
        "max_age": 86400,
        "temporary": false
    })
}
