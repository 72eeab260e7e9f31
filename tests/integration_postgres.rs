#![allow(clippy::unwrap_used, clippy::panic, missing_debug_implementations, unreachable_pub)]
use reqwest::StatusCode;
use serde_json::json;
use social_media_api::api::schemas::account::Account;
use social_media_api::api::schemas::message::Message;

mod common;

use common::{TestApp, unique_name};

#[tokio::test]
async fn test_pg_register_login_and_list() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let name = unique_name("pg_bob");

    let account = app.register_user(&name, "pass").await;
    assert_eq!(account.username, name);

    let resp = app.post_json("/register", &json!({ "username": name, "password": "other" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.post_json("/login", &json!({ "username": name, "password": "pass" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let logged_in: Account = resp.json().await.unwrap();
    assert_eq!(logged_in, account);

    let resp = app.post_json("/login", &json!({ "username": name, "password": "PASS" })).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let accounts: Vec<Account> = app.get("/accounts").await.json().await.unwrap();
    assert!(accounts.contains(&account));
}

#[tokio::test]
async fn test_pg_update_account() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let account = app.register_user(&unique_name("pg_old"), "pass").await;
    let renamed = unique_name("pg_new");
    let path = format!("/accounts/{}", account.account_id);

    let resp = app.put_json(&path, &json!({ "username": renamed, "password": "secret" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Account = resp.json().await.unwrap();
    assert_eq!(updated.account_id, account.account_id);
    assert_eq!(updated.username, renamed);

    let resp = app.post_json("/login", &json!({ "username": renamed, "password": "secret" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pg_oversized_credentials_rejected() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let account = app.register_user(&unique_name("pg_long"), "pass").await;
    let path = format!("/accounts/{}", account.account_id);

    let resp = app.post_json("/register", &json!({ "username": "u".repeat(256), "password": "pass" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.put_json(&path, &json!({ "username": "u".repeat(256), "password": "pass" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.put_json(&path, &json!({ "username": account.username, "password": "p".repeat(256) })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pg_message_lifecycle() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let author = app.register_user(&unique_name("pg_author"), "pass").await;

    let posted = app.create_message(author.account_id, "hello postgres", 1_669_947_792).await;
    assert_eq!(posted.posted_by, author.account_id);
    assert_eq!(posted.time_posted_epoch, 1_669_947_792);

    let path = format!("/messages/{}", posted.message_id);
    let fetched: Message = app.get(&path).await.json().await.unwrap();
    assert_eq!(fetched, posted);

    let all: Vec<Message> = app.get("/messages").await.json().await.unwrap();
    assert!(all.contains(&posted));

    let by_author: Vec<Message> =
        app.get(&format!("/accounts/{}/messages", author.account_id)).await.json().await.unwrap();
    assert_eq!(by_author, vec![posted.clone()]);

    let resp = app.put_json(&path, &json!({ "message_text": "edited" })).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Message = resp.json().await.unwrap();
    assert_eq!(updated.message_text, "edited");
    assert_eq!(updated.time_posted_epoch, posted.time_posted_epoch);

    let reread: Message = app.get(&path).await.json().await.unwrap();
    assert_eq!(reread, updated);

    let resp = app.delete(&path).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Message = resp.json().await.unwrap();
    assert_eq!(deleted, updated);

    let resp = app.delete(&path).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().is_empty());

    let resp = app.get(&path).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pg_message_validation() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let author = app.register_user(&unique_name("pg_bounds"), "pass").await;

    let resp = app.post_message(author.account_id, &"a".repeat(254), 1).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.post_message(author.account_id, &"a".repeat(255), 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.post_message(author.account_id, "   ", 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.post_message(i32::MAX, "nobody wrote this", 1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.put_json(&format!("/messages/{}", i32::MAX), &json!({ "message_text": "ghost" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pg_text_is_bound_not_interpolated() {
    let Some(app) = TestApp::spawn_with_database().await else { return };
    let name = unique_name("pg_o'brien");
    let author = app.register_user(&name, "pa'ss; DROP TABLE account; --").await;

    let text = "it's a '); DELETE FROM message; -- test";
    let posted = app.create_message(author.account_id, text, 7).await;
    assert_eq!(posted.message_text, text);

    let resp = app.post_json("/login", &json!({ "username": name, "password": "pa'ss; DROP TABLE account; --" })).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Message = app.get(&format!("/messages/{}", posted.message_id)).await.json().await.unwrap();
    assert_eq!(fetched.message_text, text);
}

#[tokio::test]
async fn test_pg_readiness() {
    let Some(app) = TestApp::spawn_with_database().await else { return };

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
