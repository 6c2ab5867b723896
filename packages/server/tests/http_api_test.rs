//! Integration tests for the HTTP API.

mod common;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(server.http_url("/api/health")).await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_create_and_list_rooms() {
    // テスト項目: 作成したルームが名前順の一覧と ID 指定で取得できる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let random: Value = client
        .post(server.http_url("/api/rooms"))
        .query(&[("name", "random")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let general: Value = client
        .post(server.http_url("/api/rooms"))
        .query(&[("name", "general")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(random["name"], "random");
    assert_eq!(random["userCount"], 0);
    assert_ne!(random["id"], general["id"]);

    let rooms: Vec<Value> = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = rooms.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["general", "random"]);

    let id = random["id"].as_str().unwrap();
    let detail: Value = reqwest::get(server.http_url(&format!("/api/rooms/{}", id)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail, random);
}

#[tokio::test]
async fn test_get_unknown_room_is_not_found() {
    // テスト項目: 存在しないルームの取得は 404 になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(server.http_url("/api/rooms/does-not-exist"))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_room_with_blank_name_is_bad_request() {
    // テスト項目: 空白だけの名前でのルーム作成は 400 になり、ルームは作成されない
    // given (前提条件):
    let server = TestServer::start().await;
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .post(server.http_url("/api/rooms"))
        .query(&[("name", "   ")])
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("room name"));
    let rooms: Vec<Value> = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rooms.is_empty());
}

#[tokio::test]
async fn test_online_users_after_join() {
    // テスト項目: join したユーザーがオンラインユーザー一覧に含まれる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut bob = server.connect().await;
    let mut alice = server.connect().await;

    // when (操作):
    bob.join("bob", None).await;
    alice.join("alice", None).await;
    bob.barrier().await;
    alice.barrier().await;

    // then (期待する結果):
    let body: Value = reqwest::get(server.http_url("/api/users"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"count": 2, "users": ["alice", "bob"]}));
}
