//! Integration tests for chat routing over WebSocket.

mod common;

use std::time::Duration;

use common::TestServer;
use serde_json::json;

const SILENCE: Duration = Duration::from_millis(300);

#[tokio::test]
async fn test_join_public_broadcasts_join_and_online_users() {
    // テスト項目: 公開チャットへの入室で入室通知とオンラインユーザー一覧が配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut observer = server.connect().await;
    observer
        .subscribe_all(&["/topic/public", "/topic/users"])
        .await;
    let mut alice = server.connect().await;

    // when (操作):
    alice.join("alice", None).await;

    // then (期待する結果):
    let join = observer.recv_from("/topic/public").await;
    assert_eq!(join["type"], "JOIN");
    assert_eq!(join["sender"], "alice");
    assert_eq!(join["content"], "alice joined");

    let users = observer.recv_from("/topic/users").await;
    assert_eq!(users["count"], 1);
    assert_eq!(users["users"], json!(["alice"]));
}

#[tokio::test]
async fn test_public_message_round_trip() {
    // テスト項目: 公開チャットのメッセージは本文そのままで、タイムスタンプが減少しない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    alice.subscribe_all(&["/topic/public"]).await;
    alice.join("alice", None).await;
    alice.recv_from("/topic/public").await;

    // when (操作):
    alice
        .send(
            "/app/chat.sendMessage",
            json!({"type": "CHAT", "sender": "alice", "content": "first"}),
        )
        .await;
    alice
        .send(
            "/app/chat.sendMessage",
            json!({"type": "CHAT", "sender": "alice", "content": "  second  "}),
        )
        .await;

    // then (期待する結果):
    let first = alice.recv_from("/topic/public").await;
    let second = alice.recv_from("/topic/public").await;
    assert_eq!(first["type"], "CHAT");
    assert_eq!(first["content"], "first");
    assert_eq!(second["content"], "  second  ");
    let t1 = first["timestamp"].as_i64().unwrap();
    let t2 = second["timestamp"].as_i64().unwrap();
    assert!(t1 > 0);
    assert!(t1 <= t2);
}

#[tokio::test]
async fn test_room_message_stays_in_room() {
    // テスト項目: ルーム宛のメッセージはルームトピックの購読者にだけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("lobby").await;
    let room_topic = format!("/topic/room.{}", room_id);

    let mut alice = server.connect().await;
    alice.subscribe_all(&[&room_topic]).await;
    alice.join("alice", Some(&room_id)).await;
    let join = alice.recv_from(&room_topic).await;
    assert_eq!(join["type"], "JOIN");

    let mut outsider = server.connect().await;
    outsider.subscribe_all(&["/topic/public"]).await;

    // when (操作):
    alice
        .send(
            &format!("/app/chat.sendMessage/{}", room_id),
            json!({"sender": "alice", "content": "room only"}),
        )
        .await;

    // then (期待する結果):
    let body = alice.recv_from(&room_topic).await;
    assert_eq!(body["content"], "room only");
    outsider.expect_silence(SILENCE).await;
}

#[tokio::test]
async fn test_private_message_reaches_only_recipient() {
    // テスト項目: alice がルーム R1 に入室中、bob の個人宛メッセージは alice にだけ届き、
    //             送信者名はサーバーが bob に上書きする
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("R1").await;
    let room_topic = format!("/topic/room.{}", room_id);

    let mut alice = server.connect().await;
    alice.subscribe_all(&[&room_topic, "/topic/public"]).await;
    alice.join("alice", Some(&room_id)).await;
    alice.barrier().await;

    let mut bob = server.connect().await;
    bob.subscribe_all(&["/topic/public"]).await;
    bob.join("bob", None).await;
    bob.barrier().await;

    let mut carol = server.connect().await;
    carol
        .subscribe_all(&[&room_topic, "/topic/public", "/topic/users"])
        .await;
    alice.barrier().await;

    // when (操作):
    bob.send(
        "/app/chat.private",
        json!({"sender": "mallory", "recipient": "alice", "content": "psst"}),
    )
    .await;

    // then (期待する結果):
    let (destination, body) = alice.recv().await;
    assert_eq!(destination, "/user/queue/messages");
    assert_eq!(body["sender"], "bob");
    assert_eq!(body["recipient"], "alice");
    assert_eq!(body["content"], "psst");
    alice.expect_silence(SILENCE).await;
    bob.expect_silence(SILENCE).await;
    carol.expect_silence(SILENCE).await;
}

#[tokio::test]
async fn test_private_message_to_offline_user_is_silently_dropped() {
    // テスト項目: オフラインのユーザー宛の個人宛メッセージはどこにも届かず、
    //             送信者にもエラーは通知されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut bob = server.connect().await;
    bob.subscribe_all(&["/topic/public"]).await;
    bob.join("bob", None).await;
    bob.barrier().await;

    let mut observer = server.connect().await;
    observer
        .subscribe_all(&["/topic/public", "/topic/users"])
        .await;

    // when (操作):
    bob.send(
        "/app/chat.private",
        json!({"recipient": "ghost", "content": "anyone?"}),
    )
    .await;

    // then (期待する結果):
    bob.expect_silence(SILENCE).await;
    observer.expect_silence(SILENCE).await;
}

#[tokio::test]
async fn test_disconnect_public_user_broadcasts_leave() {
    // テスト項目: 公開チャットのみのユーザーが切断すると /topic/public に退室通知が届き、
    //             ルームの在室人数は変化しない
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("lobby").await;

    let mut member = server.connect().await;
    member.join("member", Some(&room_id)).await;
    member.barrier().await;

    let mut observer = server.connect().await;
    observer
        .subscribe_all(&["/topic/public", "/topic/users"])
        .await;

    let mut alice = server.connect().await;
    alice.join("alice", None).await;
    alice.barrier().await;
    let join = observer.recv_from("/topic/public").await;
    assert_eq!(join["content"], "alice joined");

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    let leave = observer.recv_from("/topic/public").await;
    assert_eq!(leave["type"], "LEAVE");
    assert_eq!(leave["content"], "alice left");
    let users = observer.recv_from("/topic/users").await;
    assert_eq!(users["users"], json!(["member"]));

    let room: serde_json::Value = reqwest::get(server.http_url(&format!("/api/rooms/{}", room_id)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room["userCount"], 1);
}

#[tokio::test]
async fn test_disconnect_from_room_releases_occupancy() {
    // テスト項目: ルーム入室中のユーザーが切断すると在室人数が戻り、退室通知がルームに届く
    // given (前提条件):
    let server = TestServer::start().await;
    let room_id = server.create_room("lobby").await;
    let room_topic = format!("/topic/room.{}", room_id);

    let mut observer = server.connect().await;
    observer.subscribe_all(&[&room_topic]).await;

    let mut alice = server.connect().await;
    alice.join("alice", Some(&room_id)).await;
    alice.barrier().await;
    observer.recv_from(&room_topic).await;

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    let leave = observer.recv_from(&room_topic).await;
    assert_eq!(leave["type"], "LEAVE");
    assert_eq!(leave["sender"], "alice");

    let room: serde_json::Value = reqwest::get(server.http_url(&format!("/api/rooms/{}", room_id)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(room["userCount"], 0);
}

#[tokio::test]
async fn test_malformed_frame_is_reported_to_originator_only() {
    // テスト項目: 不正なフレームのエラーは送信元にだけ通知され、接続は継続する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    bob.subscribe_all(&["/topic/public"]).await;

    // when (操作):
    alice.send_raw("{not json").await;

    // then (期待する結果):
    let (destination, body) = alice.recv().await;
    assert_eq!(destination, "/user/queue/errors");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("An error occurred:")
    );
    bob.expect_silence(SILENCE).await;

    // 同じ接続で続けて join できる
    alice.subscribe_all(&["/topic/public"]).await;
    alice.join("alice", None).await;
    let join = alice.recv_from("/topic/public").await;
    assert_eq!(join["content"], "alice joined");
}

#[tokio::test]
async fn test_each_connection_gets_distinct_id() {
    // テスト項目: 接続ごとに異なるコネクション ID が払い出される
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let first = server.connect().await;
    let second = server.connect().await;

    // then (期待する結果):
    assert!(!first.connection_id.is_empty());
    assert_ne!(first.connection_id, second.connection_id);
}
