//! Datastore-backed service tests
//!
//! Run with `--features ssr -- --ignored` against a database that already
//! has the messaging schema.

use aigm::backend::error::BackendError;
use aigm::backend::{conversations, friends, messaging, users};
use aigm::shared::messaging::{
    ConversationCreate, FriendRequestCreate, FriendshipStatus, MessageCreate, MessageEdit,
    MessagePage,
};
use aigm::shared::search::SearchParams;
use aigm::shared::AppConfig;
use axum::http::StatusCode;
use serial_test::serial;

use crate::common::*;
use crate::{assert_err, assert_ok};

/// Two users with an accepted friendship
async fn befriended(db: &mut TestDatabase) -> ((uuid::Uuid, String), (uuid::Uuid, String)) {
    let alice = db.create_user("alice", Some("Alice")).await;
    let bob = db.create_user("bob", None).await;

    let request = FriendRequestCreate::new(bob.1.clone());
    let friendship = assert_ok!(friends::send_friend_request(db.pool(), alice.0, &request).await);
    assert_ok!(friends::accept_friend_request(db.pool(), bob.0, friendship.id).await);
    (alice, bob)
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL with the messaging schema"]
async fn test_friend_request_lifecycle() {
    let mut db = TestDatabase::new().await;
    let alice = db.create_user("alice", None).await;
    let bob = db.create_user("bob", None).await;

    let request = FriendRequestCreate::new(bob.1.to_uppercase());
    let friendship = assert_ok!(friends::send_friend_request(db.pool(), alice.0, &request).await);
    assert_eq!(friendship.status, FriendshipStatus::Pending);
    assert_eq!(friendship.addressee.as_ref().map(|p| p.id), Some(bob.0));

    // Duplicate in either direction
    let again = FriendRequestCreate::new(alice.1.clone());
    let err = friends::send_friend_request(db.pool(), bob.0, &again).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
    assert_eq!(err.message(), "Friend request already pending");

    // Only the addressee accepts
    assert_err!(
        friends::accept_friend_request(db.pool(), alice.0, friendship.id).await,
        BackendError::Forbidden { .. }
    );
    let accepted = assert_ok!(friends::accept_friend_request(db.pool(), bob.0, friendship.id).await);
    assert_eq!(accepted.status, FriendshipStatus::Accepted);
    assert!(assert_ok!(friends::are_friends(db.pool(), alice.0, bob.0).await));

    let friends_of_alice = assert_ok!(friends::list_friends(db.pool(), alice.0).await);
    assert_eq!(friends_of_alice.len(), 1);
    assert_eq!(friends_of_alice[0].id, bob.0);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL with the messaging schema"]
async fn test_cannot_befriend_self_or_missing_user() {
    let mut db = TestDatabase::new().await;
    let alice = db.create_user("alice", None).await;

    let err = friends::send_friend_request(db.pool(), alice.0, &FriendRequestCreate::new(alice.1.clone()))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Cannot send friend request to yourself");

    let err = friends::send_friend_request(db.pool(), alice.0, &FriendRequestCreate::new("nobody_here_xyz"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL with the messaging schema"]
async fn test_conversation_and_messages() {
    let mut db = TestDatabase::new().await;
    let config = AppConfig::default();
    let (alice, bob) = befriended(&mut db).await;

    let open = ConversationCreate {
        participant_username: bob.1.clone(),
    };
    let conversation = assert_ok!(conversations::create_or_find_conversation(db.pool(), alice.0, &open).await);
    let reopened = assert_ok!(conversations::create_or_find_conversation(db.pool(), alice.0, &open).await);
    assert_eq!(conversation.id, reopened.id);
    assert_eq!(conversation.participants.len(), 2);

    let request = MessageCreate::direct(conversation.id, plain("<script>hi</script>"));
    let message = assert_ok!(messaging::send_message(db.pool(), alice.0, &request).await);
    assert_eq!(first_text(&message.content.to_value()), "hi");

    let touched = assert_ok!(conversations::get_conversation(db.pool(), alice.0, conversation.id).await);
    assert_eq!(
        touched.updated_at.map(|t| t.timestamp_micros()),
        Some(message.created_at.timestamp_micros())
    );

    // Rejected content never reaches the datastore
    let empty = MessageCreate::direct(conversation.id, plain(""));
    let err = messaging::send_message(db.pool(), alice.0, &empty).await.unwrap_err();
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message(), "message cannot be empty");

    // Only the author edits
    let edit = MessageEdit { content: plain("edited") };
    assert_err!(
        messaging::edit_message(db.pool(), bob.0, message.id, &edit).await,
        BackendError::Forbidden { .. }
    );
    let edited = assert_ok!(messaging::edit_message(db.pool(), alice.0, message.id, &edit).await);
    assert_eq!(first_text(&edited.content.to_value()), "edited");

    let page = assert_ok!(
        messaging::list_dm_messages(db.pool(), &config, bob.0, conversation.id, MessagePage::new(1, 0)).await
    );
    assert_eq!(page.total, 1);
    assert!(page.has_more);
    assert_eq!(page.conversation_id, conversation.id);

    let listed = assert_ok!(conversations::list_conversations(db.pool(), bob.0).await);
    assert_eq!(listed.total, 1);
    assert!(listed.conversations[0].last_message.is_some());

    assert_ok!(messaging::delete_message(db.pool(), alice.0, message.id).await);
    assert_ok!(conversations::delete_conversation(db.pool(), alice.0, conversation.id).await);
    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL with the messaging schema"]
async fn test_search_excludes_self_and_blocked() {
    let mut db = TestDatabase::new().await;
    let config = AppConfig::default();
    let searcher = db.create_user("searcher", None).await;
    let exact = db.create_user("zqx", None).await;
    let prefixed = db.create_user("zqxplus", Some("zqx fan")).await;
    let blocked = db.create_user("zqxblocked", None).await;

    let friendship = assert_ok!(
        friends::send_friend_request(db.pool(), searcher.0, &FriendRequestCreate::new(blocked.1.clone())).await
    );
    assert_ok!(friends::block_friendship(db.pool(), blocked.0, friendship.id).await);

    let response = assert_ok!(
        users::search_users(db.pool(), &config, searcher.0, &SearchParams::new("ZQX")).await
    );
    let ids: Vec<_> = response.users.iter().map(|u| u.id).collect();
    assert!(ids.contains(&exact.0));
    assert!(ids.contains(&prefixed.0));
    assert!(!ids.contains(&blocked.0));
    assert!(!ids.contains(&searcher.0));
    assert_eq!(response.limit, 20);

    let err = users::search_users(db.pool(), &config, searcher.0, &SearchParams::new("   "))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    db.cleanup().await.unwrap();
}
