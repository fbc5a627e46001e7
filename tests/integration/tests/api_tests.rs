//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET (REDIS_URL optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, next_id, TestServer,
    TestUser,
};
use reqwest::StatusCode;
use serde_json::json;

async fn create_channel(server: &TestServer, owner: &TestUser) -> ChannelResponse {
    let request = CreateChannelRequest::public(next_id());
    let response = server.post_auth("/channels", owner, &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_member(server: &TestServer, channel: &ChannelResponse, actor: &TestUser, user: &TestUser) {
    let response = server
        .post_auth(
            &format!("/channels/{}/members", channel.id),
            actor,
            &AddMemberRequest::member(user.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me/starred").await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Channel Tests
// ============================================================================

#[tokio::test]
async fn test_create_channel_makes_creator_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let workspace_id = next_id();
    let request = CreateChannelRequest::public(workspace_id);

    let response = server.post_auth("/channels", &owner, &request).await.unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(channel.name, request.name);
    assert_eq!(channel.workspace_id, workspace_id);
    assert_eq!(channel.channel_type, "public");
    assert!(!channel.is_archived);

    let response = server
        .get_auth(&format!("/channels/{}", channel.id), &owner)
        .await
        .unwrap();
    let details: ChannelDetailsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(details.channel.id, channel.id);
    assert_eq!(details.member_count, 1);
    assert_eq!(details.my_role.as_deref(), Some("owner"));
}

#[tokio::test]
async fn test_duplicate_channel_name_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let request = CreateChannelRequest::private(next_id());

    let response = server.post_auth("/channels", &owner, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth("/channels", &owner, &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "CHANNEL_NAME_TAKEN");
}

#[tokio::test]
async fn test_unknown_channel_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.user().unwrap();

    let response = server
        .get_auth(&format!("/channels/{}", next_id()), &user)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_CHANNEL");
}

#[tokio::test]
async fn test_only_owner_can_delete_channel() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let member = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &member).await;

    let path = format!("/channels/{}", channel.id);

    let response = server.delete_auth(&path, &member).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &owner).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &owner).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_archived_channel_rejects_new_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let newcomer = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;

    let response = server
        .post_auth(&format!("/channels/{}/archive", channel.id), &owner, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post_auth(
            &format!("/channels/{}/members", channel.id),
            &owner,
            &AddMemberRequest::member(newcomer.id),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "CHANNEL_ARCHIVED");

    let response = server
        .post_auth(&format!("/channels/{}/unarchive", channel.id), &owner, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    add_member(&server, &channel, &owner, &newcomer).await;
}

#[tokio::test]
async fn test_transfer_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let successor = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &successor).await;

    let response = server
        .post_auth(
            &format!("/channels/{}/transfer-ownership", channel.id),
            &owner,
            &TransferOwnershipRequest {
                new_owner_id: successor.id,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/channels/{}/members/{}", channel.id, successor.id), &successor)
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(member.role, "owner");

    let response = server
        .get_auth(&format!("/channels/{}/members/{}", channel.id, owner.id), &owner)
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(member.role, "owner");
}

// ============================================================================
// Membership Tests
// ============================================================================

#[tokio::test]
async fn test_member_cannot_add_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let member = server.user().unwrap();
    let outsider = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &member).await;

    let response = server
        .post_auth(
            &format!("/channels/{}/members", channel.id),
            &member,
            &AddMemberRequest::member(outsider.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_add_member_twice_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let admin = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;

    let path = format!("/channels/{}/members", channel.id);
    let response = server
        .post_auth(&path, &owner, &AddMemberRequest::admin(admin.id))
        .await
        .unwrap();
    let member: MemberResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(member.channel_id, channel.id);
    assert_eq!(member.user_id, admin.id);
    assert_eq!(member.role, "admin");

    let response = server
        .post_auth(&path, &owner, &AddMemberRequest::member(admin.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_MEMBER");

    let response = server.get_auth(&path, &owner).await.unwrap();
    let members: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_owner_cannot_leave() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let member = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &member).await;

    let path = format!("/channels/{}/leave", channel.id);

    let response = server.post_auth(&path, &owner, &json!({})).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "CANNOT_LEAVE_OWNER");

    let response = server.post_auth(&path, &member, &json!({})).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Invite Tests
// ============================================================================

#[tokio::test]
async fn test_single_use_invite() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let first = server.user().unwrap();
    let second = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;

    let response = server
        .post_auth(
            &format!("/channels/{}/invites", channel.id),
            &owner,
            &CreateInviteRequest::single_use(),
        )
        .await
        .unwrap();
    let created: InviteDetailsResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.channel_name, channel.name);
    assert_eq!(created.invite.max_uses, 1);
    assert_eq!(created.invite.use_count, 0);
    assert!(created.invite.is_active);

    let join_path = format!("/invites/{}/join", created.invite.code);

    let response = server.post_auth(&join_path, &first, &json!({})).await.unwrap();
    let joined: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(joined.id, channel.id);

    let response = server.post_auth(&join_path, &second, &json!({})).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "INVITE_MAX_USES");
}

#[tokio::test]
async fn test_unknown_invite_code() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = server.user().unwrap();

    let response = server
        .post_auth("/invites/doesnotexist/join", &user, &json!({}))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_INVITE");
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_ban_removes_member_and_blocks_rejoin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let troll = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &troll).await;

    let response = server
        .put_auth(
            &format!("/channels/{}/bans/{}", channel.id, troll.id),
            &owner,
            &RestrictMemberRequest {
                reason: Some("spam".to_string()),
                expires_at: None,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/channels/{}/members/{}", channel.id, troll.id), &owner)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth(
            &format!("/channels/{}/members", channel.id),
            &owner,
            &AddMemberRequest::member(troll.id),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USER_BANNED");

    let response = server
        .get_auth(&format!("/channels/{}/moderation-log", channel.id), &owner)
        .await
        .unwrap();
    let log: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(log["data"].as_array().is_some_and(|entries| !entries.is_empty()));
    assert_eq!(log["pagination"]["offset"], 0);
}

#[tokio::test]
async fn test_owner_cannot_be_banned() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let admin = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;

    let response = server
        .post_auth(
            &format!("/channels/{}/members", channel.id),
            &owner,
            &AddMemberRequest::admin(admin.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put_auth(
            &format!("/channels/{}/bans/{}", channel.id, owner.id),
            &admin,
            &RestrictMemberRequest::default(),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "CANNOT_MODERATE_OWNER");
}

// ============================================================================
// Poll Tests
// ============================================================================

#[tokio::test]
async fn test_poll_voting_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let voter = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;
    add_member(&server, &channel, &owner, &voter).await;

    let response = server
        .post_auth(
            &format!("/channels/{}/polls", channel.id),
            &owner,
            &CreatePollRequest::lunch(),
        )
        .await
        .unwrap();
    let poll: PollResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(poll.options.len(), 3);
    assert_eq!(poll.options[0].text, "Noodles");

    let poll_path = format!("/channels/{}/polls/{}", channel.id, poll.id);
    let choice = VoteRequest {
        option_ids: vec![poll.options[1].id],
    };

    let response = server
        .post_auth(&format!("{poll_path}/votes"), &voter, &choice)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post_auth(&format!("{poll_path}/votes"), &voter, &choice)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_VOTED");

    let response = server
        .post_auth(&format!("{poll_path}/close"), &owner, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post_auth(&format!("{poll_path}/votes"), &owner, &choice)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "POLL_CLOSED");

    let response = server
        .get_auth(&format!("{poll_path}/results"), &voter)
        .await
        .unwrap();
    let results: PollResultsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(results.is_closed);
    assert_eq!(results.total_votes, 1);
    let tacos = results
        .results
        .iter()
        .find(|r| r.option_id == poll.options[1].id)
        .expect("option missing from results");
    assert_eq!(tacos.vote_count, 1);
}

#[tokio::test]
async fn test_poll_requires_two_options() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.user().unwrap();
    let channel = create_channel(&server, &owner).await;

    let request = CreatePollRequest {
        options: vec!["Only one".to_string()],
        ..CreatePollRequest::lunch()
    };
    let response = server
        .post_auth(&format!("/channels/{}/polls", channel.id), &owner, &request)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");
}
