//! API Integration Tests
//!
//! Runs the client against a wiremock server; no network access needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use accord_client::{
    ApiError, Channel, CreateInvite, CreateRole, OverwriteType, PermissionOverwrite, Permissions,
    USER_AGENT,
};
use integration_tests::{
    assert_transport_status, fixtures::*, TestServer, TEST_TOKEN,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_default_headers_sent() {
    let server = TestServer::start().await.expect("Failed to start server");

    Mock::given(method("GET"))
        .and(path(TestServer::api_path("/users/@me")))
        .and(header("authorization", format!("Bot {TEST_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_record(1, "accord")))
        .expect(1)
        .mount(&server.server)
        .await;

    let me = server.client.get_current_user().await.unwrap();
    assert_eq!(me.username.as_deref(), Some("accord"));

    // The user agent contains a comma, which wiremock's header matcher splits on
    let agents = server.received_header("user-agent").await.unwrap();
    assert_eq!(agents, vec![USER_AGENT.to_string()]);
}

#[tokio::test]
async fn test_get_guild_not_found() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .respond("GET", "/guilds/1", 404, json!({"message": "Unknown Guild", "code": 10004}))
        .await;

    let err = server.client.get_guild(1u64).await.unwrap_err();
    assert_transport_status(&err, 404).unwrap();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_forbidden_and_rate_limited_are_distinguishable() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .respond("DELETE", "/guilds/2", 403, json!({"message": "Missing Permissions"}))
        .await;
    server
        .respond("GET", "/guilds/3/roles", 429, json!({"retry_after": 1.5, "global": false}))
        .await;

    let forbidden = server.client.delete_guild(2u64).await.unwrap_err();
    assert!(forbidden.is_forbidden());

    let limited = server.client.get_guild_roles(3u64).await.unwrap_err();
    assert!(limited.is_rate_limited());
    assert_eq!(limited.status(), Some(429));
}

#[tokio::test]
async fn test_malformed_record_fails_loudly() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.respond("GET", "/guilds/4", 200, json!({"id": "4"})).await;

    let err = server.client.get_guild(4u64).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { entity: "guild", .. }));
}

// ============================================================================
// Guild Tests
// ============================================================================

#[tokio::test]
async fn test_create_guild() {
    let server = TestServer::start().await.expect("Failed to start server");
    let id = unique_id();

    Mock::given(method("POST"))
        .and(path(TestServer::api_path("/guilds")))
        .and(body_json(json!({"name": "Test Guild"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(guild_record(id, "Test Guild")))
        .expect(1)
        .mount(&server.server)
        .await;

    let guild = server.client.create_guild("Test Guild").await.unwrap();
    assert_eq!(guild.id.get(), id);
    assert_eq!(guild.name, "Test Guild");
    assert!(guild.roles_cached().is_none());
}

#[tokio::test]
async fn test_guild_roles_lazy_fetch() {
    let server = TestServer::start().await.expect("Failed to start server");
    let guild_id = unique_id();

    server.respond("GET", &format!("/guilds/{guild_id}"), 200, guild_record(guild_id, "G")).await;
    server
        .respond(
            "GET",
            &format!("/guilds/{guild_id}/roles"),
            200,
            json!([role_record(guild_id, "@everyone", "104324161"), role_record(7, "mods", "8")]),
        )
        .await;

    let guild = server.client.get_guild(guild_id).await.unwrap();
    let roles = guild.roles().await.unwrap();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1].permissions, Permissions::ADMINISTRATOR);

    // Served from cache; the mock's expect(1) fails the test otherwise
    guild.roles().await.unwrap();
    assert_eq!(server.request_count().await, 2);
}

#[tokio::test]
async fn test_guild_with_embedded_roles_needs_no_fetch() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut record = guild_record(5, "G");
    record["roles"] = json!([role_record(5, "@everyone", "0")]);
    server.respond("GET", "/guilds/5", 200, record).await;

    let guild = server.client.get_guild(5u64).await.unwrap();
    assert_eq!(guild.roles().await.unwrap().len(), 1);
    assert_eq!(server.request_count().await, 1);
}

#[tokio::test]
async fn test_create_role_sends_only_supplied_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    Mock::given(method("POST"))
        .and(path(TestServer::api_path("/guilds/9/roles")))
        .and(body_json(json!({"name": "mods", "mentionable": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_record(11, "mods", "0")))
        .expect(1)
        .mount(&server.server)
        .await;

    let role = server
        .client
        .create_guild_role(9u64, &CreateRole::new().name("mods").mentionable(true))
        .await
        .unwrap();
    assert_eq!(role.id.get(), 11);

    let bodies = server.received_bodies().await.unwrap();
    assert_eq!(bodies, vec![json!({"name": "mods", "mentionable": true})]);
}

#[tokio::test]
async fn test_create_role_with_merged_permissions() {
    let server = TestServer::start().await.expect("Failed to start server");

    Mock::given(method("POST"))
        .and(path(TestServer::api_path("/guilds/9/roles")))
        .and(body_json(json!({"name": "staff", "permissions": "6"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(role_record(12, "staff", "6")))
        .expect(1)
        .mount(&server.server)
        .await;

    let permissions = Permissions::merge([Permissions::KICK_MEMBERS, Permissions::BAN_MEMBERS]);
    let role = server
        .client
        .create_guild_role(9u64, &CreateRole::new().name("staff").permissions(permissions))
        .await
        .unwrap();
    assert!(role.has_permission(Permissions::BAN_MEMBERS));
}

#[tokio::test]
async fn test_member_actions() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.respond_empty("PUT", "/guilds/1/members/2/roles/3").await;
    server.respond_empty("DELETE", "/guilds/1/members/2").await;
    server.respond("GET", "/guilds/1", 200, guild_record(1, "G")).await;

    let guild = server.client.get_guild(1u64).await.unwrap();
    guild.add_member_role(2u64, 3u64).await.unwrap();
    guild.remove_member(2u64).await.unwrap();
}

#[tokio::test]
async fn test_current_user_guilds() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.respond("GET", "/users/@me", 200, user_record(1, "accord")).await;
    server
        .respond(
            "GET",
            "/users/@me/guilds",
            200,
            json!([
                {"id": "10", "name": "One", "icon": null, "owner": true, "permissions": "8"},
                {"id": "20", "name": "Two", "icon": null, "owner": false, "permissions": "0"}
            ]),
        )
        .await;

    let me = server.client.get_current_user().await.unwrap();
    let guilds = me.guilds().await.unwrap();
    let names: Vec<&str> = guilds.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Two"]);
    assert_eq!(guilds[0].owner, Some(true));

    // Guilds from the list are bound to the client too
    assert!(guilds[1].client().is_bound());
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_guild_channels_resolve_variants() {
    let server = TestServer::start().await.expect("Failed to start server");
    server
        .respond(
            "GET",
            "/guilds/1/channels",
            200,
            json!([
                channel_record(100, 1, "general", 0),
                channel_record(101, 1, "Voice", 2),
                channel_record(102, 1, "future", 99)
            ]),
        )
        .await;

    let channels = server.client.get_guild_channels(1u64).await.unwrap();
    assert!(matches!(channels[0], Channel::Text(_)));
    assert!(matches!(channels[1], Channel::Generic(_)));
    assert!(matches!(channels[2], Channel::Generic(_)));
    assert_eq!(channels[2].type_code(), 99);
    assert_eq!(channels[2].guild_id(), channels[0].guild_id());
}

#[tokio::test]
async fn test_text_channel_create_invite() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.respond("GET", "/channels/100", 200, channel_record(100, 1, "general", 0)).await;

    Mock::given(method("POST"))
        .and(path(TestServer::api_path("/channels/100/invites")))
        .and(body_json(json!({"max_age": 3600, "max_uses": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(invite_record("abc123")))
        .expect(1)
        .mount(&server.server)
        .await;

    let channel = server.client.get_channel(100u64).await.unwrap();
    let text = channel.as_text().expect("type 0 is a text channel");
    let invite = text
        .create_invite(CreateInvite::new().max_age(3600).max_uses(5))
        .await
        .unwrap();
    assert_eq!(invite.url(), "https://discord.gg/abc123");
}

#[tokio::test]
async fn test_send_and_get_message() {
    let server = TestServer::start().await.expect("Failed to start server");

    Mock::given(method("POST"))
        .and(path(TestServer::api_path("/channels/100/messages")))
        .and(body_json(json!({"content": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_record(500, 100, "hello")))
        .expect(1)
        .mount(&server.server)
        .await;
    server
        .respond("GET", "/channels/100/messages/500", 200, message_record(500, 100, "hello"))
        .await;

    let sent = server.client.send_channel_message(100u64, "hello").await.unwrap();
    let fetched = server.client.get_channel_message(100u64, sent.id).await.unwrap();
    assert_eq!(fetched.content, "hello");
    assert_eq!(fetched.channel_id.get(), 100);
    assert!(fetched.author.is_some());
}

#[tokio::test]
async fn test_modify_single_overwrite_sent_as_array() {
    let server = TestServer::start().await.expect("Failed to start server");
    let expected = json!({
        "permission_overwrites": [{"id": "10", "type": 0, "allow": "8", "deny": "0"}]
    });

    let mut updated = channel_record(100, 1, "general", 0);
    updated["permission_overwrites"] = expected["permission_overwrites"].clone();

    Mock::given(method("PATCH"))
        .and(path(TestServer::api_path("/channels/100")))
        .and(body_json(expected.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server.server)
        .await;

    let overwrite = PermissionOverwrite::new(
        10u64.into(),
        OverwriteType::Role,
        Permissions::ADMINISTRATOR,
        Permissions::empty(),
    );
    let channel = server
        .client
        .modify_channel_overwrites(100u64, overwrite)
        .await
        .unwrap();
    assert_eq!(channel.base().permission_overwrites, vec![overwrite]);

    assert_eq!(server.received_bodies().await.unwrap(), vec![expected]);
}

#[tokio::test]
async fn test_get_channel_overwrites() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut record = channel_record(100, 1, "general", 0);
    record["permission_overwrites"] = json!([
        {"id": "10", "type": 0, "allow": "1024", "deny": "0"},
        {"id": "20", "type": 1, "allow": "0", "deny": "2048"}
    ]);
    server.respond("GET", "/channels/100", 200, record).await;

    let overwrites = server.client.get_channel_overwrites(100u64).await.unwrap();
    assert_eq!(overwrites.len(), 2);
    assert_eq!(overwrites[0].allow, Permissions::VIEW_CHANNEL);
    assert_eq!(overwrites[1].kind, OverwriteType::Member);
}

#[tokio::test]
async fn test_entity_actions_fail_after_client_dropped() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.respond("GET", "/channels/100", 200, channel_record(100, 1, "general", 0)).await;

    let TestServer { server: mock, client } = server;
    let channel = client.get_channel(100u64).await.unwrap();
    drop(client);

    let text = channel.as_text().unwrap();
    let err = text.send_message("hi").await.unwrap_err();
    assert!(matches!(err, ApiError::NoClient));
    drop(mock);
}
