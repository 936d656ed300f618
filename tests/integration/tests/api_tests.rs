//! API Integration Tests
//!
//! Every test starts its own server over an in-memory workspace, so no
//! external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

async fn register(server: &TestServer, first: &str, last: &str) -> AuthResponse {
    let response = server
        .post("/auth/register", &RegisterRequest::named(first, last))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_channel(server: &TestServer, token: &str, request: &CreateChannelRequest) -> i64 {
    let response = server.post_auth("/channels", token, request).await.unwrap();
    let created: ChannelIdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.channel_id
}

/// Public channel named "general"
async fn general(server: &TestServer, token: &str) -> i64 {
    create_channel(server, token, &CreateChannelRequest::public("general")).await
}

async fn messages(server: &TestServer, token: &str, channel_id: i64) -> MessagesPage {
    let response = server
        .get_auth(&format!("/channels/{channel_id}/messages?start=0"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["ready"], true);
    assert_eq!(body["pending_timers"], 0);
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/users").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::named("Ada", "Lovelace");

    let response = server.post("/auth/register", &request).await.unwrap();
    let registered: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!registered.token.is_empty());

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let logged_in: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(logged_in.auth_user_id, registered.auth_user_id);
    assert_ne!(logged_in.token, registered.token);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::named("Ada", "Lovelace");

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let server = TestServer::start().await.unwrap();

    let mut request = RegisterRequest::named("Ada", "Lovelace");
    request.password = "12345".to_string();
    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post("/auth/register", &json!({ "email": "ada@example.com" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::named("Ada", "Lovelace");
    server.post("/auth/register", &request).await.unwrap();

    let login = LoginRequest {
        email: request.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/auth/login", &login).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_missing_and_invalid_tokens() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/channels").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server.get_auth("/channels", "not-a-token").await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INVALID_SESSION");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;

    let response = server.post_action("/auth/logout", &ada.token).await.unwrap();
    let logout: LogoutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(logout.is_success);

    let response = server.post_action("/auth/logout", &ada.token).await.unwrap();
    let logout: LogoutResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!logout.is_success);

    let response = server.get_auth("/channels", &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "INVALID_SESSION");
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_channel_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;

    let channel_id = general(&server, &ada.token).await;

    let response = server
        .post_action(&format!("/channels/{channel_id}/join"), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/channels/{channel_id}"), &bob.token)
        .await
        .unwrap();
    let details: ChannelDetailsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(details.name, "general");
    assert!(details.is_public);
    assert_eq!(details.owner_members.len(), 1);
    assert_eq!(details.owner_members[0].u_id, ada.auth_user_id);
    assert_eq!(details.all_members.len(), 2);

    let response = server.get_auth("/channels", &bob.token).await.unwrap();
    let list: ChannelListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.channels.len(), 1);
    assert_eq!(list.channels[0].channel_id, channel_id);

    let response = server
        .post_action(&format!("/channels/{channel_id}/leave"), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/channels/{channel_id}"), &bob.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_MEMBER");
}

#[tokio::test]
async fn test_private_channel_requires_invite() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;

    let channel_id =
        create_channel(&server, &ada.token, &CreateChannelRequest::private("secret")).await;

    let response = server
        .post_action(&format!("/channels/{channel_id}/join"), &bob.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "PRIVATE_CHANNEL");

    let response = server
        .post_auth(
            &format!("/channels/{channel_id}/invite"),
            &ada.token,
            &InviteRequest {
                u_id: bob.auth_user_id,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/channels", &bob.token).await.unwrap();
    let list: ChannelListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.channels.len(), 1);

    // Private channels still show up in the full listing
    let response = server.get_auth("/channels/all", &ada.token).await.unwrap();
    let all: ChannelListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.channels.len(), 1);
    assert_eq!(all.channels[0].name, "secret");
}

#[tokio::test]
async fn test_unknown_and_malformed_channel_ids() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;

    let response = server.get_auth("/channels/999", &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");

    let response = server.get_auth("/channels/abc", &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_page_messages() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let channel_id = general(&server, &ada.token).await;

    for text in ["one", "two", "three"] {
        let response = server
            .post_auth(
                &format!("/channels/{channel_id}/messages"),
                &ada.token,
                &MessageRequest::new(text),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let page = messages(&server, &ada.token, channel_id).await;
    let texts: Vec<&str> = page.messages.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, ["three", "two", "one"]);
    assert_eq!(page.start, 0);
    assert_eq!(page.end, -1);

    let response = server
        .get_auth(&format!("/channels/{channel_id}/messages?start=4"), &ada.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_START");
}

#[tokio::test]
async fn test_message_too_long() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let channel_id = general(&server, &ada.token).await;

    let response = server
        .post_auth(
            &format!("/channels/{channel_id}/messages"),
            &ada.token,
            &MessageRequest::new("a".repeat(1001)),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_edit_pin_react_remove() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;
    let channel_id = general(&server, &ada.token).await;
    server
        .post_action(&format!("/channels/{channel_id}/join"), &bob.token)
        .await
        .unwrap();

    let response = server
        .post_auth(
            &format!("/channels/{channel_id}/messages"),
            &bob.token,
            &MessageRequest::new("draft"),
        )
        .await
        .unwrap();
    let sent: MessageIdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/messages/{}", sent.message_id);

    let response = server
        .put_auth(&path, &bob.token, &MessageRequest::new("final"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Only channel owners pin
    let response = server.post_action(&format!("{path}/pin"), &bob.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_OWNER");

    let response = server.post_action(&format!("{path}/pin"), &ada.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(&format!("{path}/react"), &ada.token, &ReactRequest { react_id: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let page = messages(&server, &ada.token, channel_id).await;
    let message = &page.messages[0];
    assert_eq!(message.message, "final");
    assert_eq!(message.u_id, bob.auth_user_id);
    assert!(message.is_pinned);
    assert_eq!(message.reacts[0].u_ids, vec![ada.auth_user_id]);
    assert!(message.reacts[0].is_this_user_reacted);

    let page = messages(&server, &bob.token, channel_id).await;
    assert!(!page.messages[0].reacts[0].is_this_user_reacted);

    let response = server
        .post_auth(&format!("{path}/react"), &ada.token, &ReactRequest { react_id: 2 })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REACT");

    let response = server.delete_auth(&path, &bob.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let page = messages(&server, &ada.token, channel_id).await;
    assert!(page.messages.is_empty());
}

// ============================================================================
// DM Tests
// ============================================================================

#[tokio::test]
async fn test_dm_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;

    let response = server
        .post_auth(
            "/dms",
            &ada.token,
            &CreateDmRequest {
                u_ids: vec![bob.auth_user_id],
            },
        )
        .await
        .unwrap();
    let dm: DmCreateResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(dm.dm_name, "adalovelace,bobjones");

    let response = server.get_auth("/dms", &bob.token).await.unwrap();
    let list: DmListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.dms.len(), 1);
    assert_eq!(list.dms[0].dm_id, dm.dm_id);

    let response = server
        .post_auth(
            &format!("/dms/{}/messages", dm.dm_id),
            &bob.token,
            &MessageRequest::new("hi ada"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/dms/{}/messages", dm.dm_id), &ada.token)
        .await
        .unwrap();
    let page: MessagesPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.messages.len(), 1);
    assert_eq!(page.messages[0].u_id, bob.auth_user_id);

    let response = server
        .post_action(&format!("/dms/{}/leave", dm.dm_id), &bob.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/dms/{}", dm.dm_id), &ada.token)
        .await
        .unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["members"].as_array().map(Vec::len), Some(1));
}

// ============================================================================
// Standup Tests
// ============================================================================

#[tokio::test]
async fn test_standup_collects_and_posts_digest() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;
    let channel_id = general(&server, &ada.token).await;
    server
        .post_action(&format!("/channels/{channel_id}/join"), &bob.token)
        .await
        .unwrap();

    let standup = format!("/channels/{channel_id}/standup");

    let response = server
        .post_auth(&standup, &ada.token, &StandupStartRequest { length: 1 })
        .await
        .unwrap();
    let started: StandupStartResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth(&standup, &bob.token).await.unwrap();
    let active: StandupActiveResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.is_active);
    assert_eq!(active.time_finish, Some(started.time_finish));

    // One window per channel
    let response = server
        .post_auth(&standup, &bob.token, &StandupStartRequest { length: 5 })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "STANDUP_ALREADY_ACTIVE");

    for (token, line) in [(&ada.token, "shipped the parser"), (&bob.token, "fixing tests")] {
        let response = server
            .post_auth(&format!("{standup}/messages"), token, &MessageRequest::new(line))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    // Buffered lines are not messages yet
    assert!(messages(&server, &ada.token, channel_id).await.messages.is_empty());

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let page = messages(&server, &ada.token, channel_id).await;
    assert_eq!(page.messages.len(), 1);
    assert_eq!(page.messages[0].u_id, ada.auth_user_id);
    assert_eq!(
        page.messages[0].message,
        "adalovelace: shipped the parser\nbobjones: fixing tests"
    );

    let response = server.get_auth(&standup, &ada.token).await.unwrap();
    let active: StandupActiveResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!active.is_active);
    assert_eq!(active.time_finish, None);

    let response = server
        .post_auth(&format!("{standup}/messages"), &bob.token, &MessageRequest::new("late"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "NO_ACTIVE_STANDUP");
}

#[tokio::test]
async fn test_standup_access_rules() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let eve = register(&server, "Eve", "Outsider").await;
    let channel_id = general(&server, &ada.token).await;
    let standup = format!("/channels/{channel_id}/standup");

    let response = server
        .post_auth(&standup, &eve.token, &StandupStartRequest { length: 60 })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_MEMBER");

    let response = server
        .post_auth(&standup, &ada.token, &StandupStartRequest { length: -1 })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_STANDUP_LENGTH");

    let response = server
        .post_auth("/channels/999/standup", &ada.token, &StandupStartRequest { length: 60 })
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");

    let response = server
        .post_auth(&standup, &ada.token, &StandupStartRequest { length: 60 })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth(&format!("{standup}/messages"), &eve.token, &MessageRequest::new("hi"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_MEMBER");

    let response = server
        .post_auth(
            &format!("{standup}/messages"),
            &ada.token,
            &MessageRequest::new("a".repeat(1001)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "MESSAGE_TOO_LONG");

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["pending_timers"], 1);
}

// ============================================================================
// User and Stats Tests
// ============================================================================

#[tokio::test]
async fn test_users_and_profiles() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;

    let response = server.get_auth("/users", &ada.token).await.unwrap();
    let users: UsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.users.len(), 2);

    let response = server
        .get_auth(&format!("/users/{}", bob.auth_user_id), &ada.token)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.user.handle_str, "bobjones");
    assert_eq!(profile.user.name_first, "Bob");

    let response = server.get_auth("/users/999", &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNKNOWN_USER");
}

#[tokio::test]
async fn test_stats_track_activity() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let _bob = register(&server, "Bob", "Jones").await;
    let channel_id = general(&server, &ada.token).await;
    server
        .post_auth(
            &format!("/channels/{channel_id}/messages"),
            &ada.token,
            &MessageRequest::new("hello"),
        )
        .await
        .unwrap();

    let response = server.get_auth("/stats", &ada.token).await.unwrap();
    let stats: WorkspaceStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let workspace = stats.dreams_stats;
    assert_eq!(workspace.channels_exist.last().map(|p| p.count), Some(1));
    assert_eq!(workspace.messages_exist.last().map(|p| p.count), Some(1));
    assert!((workspace.utilization_rate - 0.5).abs() < f64::EPSILON);

    let response = server.get_auth("/users/@me/stats", &ada.token).await.unwrap();
    let stats: UserStatsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let user = stats.user_stats;
    assert_eq!(user.channels_joined.last().map(|p| p.count), Some(1));
    assert_eq!(user.messages_sent.last().map(|p| p.count), Some(1));
    assert!((user.involvement_rate - 1.0).abs() < f64::EPSILON);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_workspace_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dreams.json");
    let request = RegisterRequest::named("Ada", "Lovelace");

    let server = TestServer::start_with_file(&path).await.unwrap();
    let response = server.post("/auth/register", &request).await.unwrap();
    let ada: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    general(&server, &ada.token).await;
    server.stop();

    let server = TestServer::start_with_file(&path).await.unwrap();

    // Sessions are persisted with the user
    let response = server.get_auth("/channels", &ada.token).await.unwrap();
    let list: ChannelListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.channels.len(), 1);
    assert_eq!(list.channels[0].name, "general");

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Later Sends, Sharing, and Search
// ============================================================================

#[tokio::test]
async fn test_send_later_over_http() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let channel_id = general(&server, &ada.token).await;
    let later = format!("/channels/{channel_id}/messages/later");

    let response = server
        .post_auth(
            &later,
            &ada.token,
            &SendLaterRequest {
                message: "from the past".to_string(),
                time_sent: unix_now() - 60,
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_TIME_SENT");

    let response = server
        .post_auth(
            &later,
            &ada.token,
            &SendLaterRequest {
                message: "good morning".to_string(),
                time_sent: unix_now() + 2,
            },
        )
        .await
        .unwrap();
    let scheduled: MessageIdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["pending_timers"], 1);
    assert!(messages(&server, &ada.token, channel_id).await.messages.is_empty());

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let page = messages(&server, &ada.token, channel_id).await;
    assert_eq!(page.messages.len(), 1);
    assert_eq!(page.messages[0].message_id, scheduled.message_id);
    assert_eq!(page.messages[0].message, "good morning");
}

#[tokio::test]
async fn test_share_and_search_over_http() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;
    let channel_id = general(&server, &ada.token).await;

    let response = server
        .post_auth(
            "/dms",
            &ada.token,
            &CreateDmRequest {
                u_ids: vec![bob.auth_user_id],
            },
        )
        .await
        .unwrap();
    let dm: DmCreateResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/channels/{channel_id}/messages"),
            &ada.token,
            &MessageRequest::new("Release notes are up"),
        )
        .await
        .unwrap();
    let original: MessageIdResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let share = format!("/messages/{}/share", original.message_id);
    let response = server
        .post_auth(
            &share,
            &ada.token,
            &ShareMessageRequest {
                message: "fyi".to_string(),
                channel_id: -1,
                dm_id: dm.dm_id,
            },
        )
        .await
        .unwrap();
    let shared: SharedMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &share,
            &ada.token,
            &ShareMessageRequest {
                message: String::new(),
                channel_id: -1,
                dm_id: -1,
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_SHARE_TARGET");

    // Bob only sees the shared copy in the DM
    let response = server
        .get_auth("/search?query_str=release%20NOTES", &bob.token)
        .await
        .unwrap();
    let hits: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(hits.messages.len(), 1);
    assert_eq!(hits.messages[0].message_id, shared.shared_message_id);
    assert_eq!(hits.messages[0].message, "Release notes are up, fyi");

    let response = server
        .get_auth("/search?query_str=release", &ada.token)
        .await
        .unwrap();
    let hits: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(hits.messages.len(), 2);

    let response = server.get_auth("/search?query_str=", &ada.token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY");
}

// ============================================================================
// Profile and Admin Tests
// ============================================================================

#[tokio::test]
async fn test_profile_updates_over_http() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;

    let response = server
        .put_auth(
            "/users/@me/handle",
            &ada.token,
            &SetHandleRequest {
                handle_str: "bobjones".to_string(),
            },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "HANDLE_ALREADY_EXISTS");

    let response = server
        .put_auth(
            "/users/@me/handle",
            &ada.token,
            &SetHandleRequest {
                handle_str: "countess".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth(
            "/users/@me/name",
            &ada.token,
            &json!({ "name_first": "Augusta", "name_last": "King" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth("/users/@me/email", &ada.token, &json!({ "email": "not-an-email" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .get_auth(&format!("/users/{}", ada.auth_user_id), &bob.token)
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.user.handle_str, "countess");
    assert_eq!(profile.user.name_first, "Augusta");
}

#[tokio::test]
async fn test_admin_remove_and_permission_over_http() {
    let server = TestServer::start().await.unwrap();
    let ada = register(&server, "Ada", "Lovelace").await;
    let bob = register(&server, "Bob", "Jones").await;
    let channel_id = general(&server, &ada.token).await;
    server
        .post_action(&format!("/channels/{channel_id}/join"), &bob.token)
        .await
        .unwrap();
    server
        .post_auth(
            &format!("/channels/{channel_id}/messages"),
            &bob.token,
            &MessageRequest::new("hello from bob"),
        )
        .await
        .unwrap();

    let response = server
        .delete_auth(&format!("/admin/users/{}", ada.auth_user_id), &bob.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_GLOBAL_OWNER");

    let response = server
        .post_auth(
            &format!("/admin/users/{}/permission", bob.auth_user_id),
            &ada.token,
            &PermissionChangeRequest { permission_id: 7 },
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PERMISSION");

    let response = server
        .delete_auth(&format!("/admin/users/{}", bob.auth_user_id), &ada.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let page = messages(&server, &ada.token, channel_id).await;
    assert_eq!(page.messages[0].message, "Removed user");

    let response = server.get_auth("/users", &ada.token).await.unwrap();
    let users: UsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.users.len(), 1);

    let response = server.get_auth("/users", &bob.token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

