use std::net::TcpListener;
use std::time::Duration;

use super::*;
use crate::test_fixtures::MockChatBackend;

fn client(url: &str) -> ChatClient {
    ChatClient::new(url, Duration::from_secs(5)).unwrap()
}

#[test]
fn test_send_posts_text_and_language() {
    let backend = MockChatBackend::replying(200, r#"{"response":"namaste!"}"#);

    let reply = client(&backend.url()).send("  namaste  ", Language::Hindi).unwrap();
    assert_eq!(reply, "namaste!");

    let bodies = backend.request_bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["text"], "namaste");
    assert_eq!(bodies[0]["language"], "hi");
}

#[test]
fn test_send_maps_backend_error_message() {
    let backend = MockChatBackend::replying(400, r#"{"response":"Please provide a message"}"#);

    let err = client(&backend.url()).send("hello", Language::English).unwrap_err();
    match err {
        PolychatError::ChatBackend { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Please provide a message");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_send_rejects_blank_text_without_request() {
    let backend = MockChatBackend::replying(200, r#"{"response":"unused"}"#);

    let err = client(&backend.url())
        .send("   ", Language::English)
        .unwrap_err();
    assert!(matches!(err, PolychatError::EmptyMessage));
    assert!(backend.request_bodies().is_empty());
}

#[test]
fn test_send_unreachable_backend() {
    // Bind then drop to get a port nothing listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{port}/chat");

    let err = client(&url).send("hello", Language::English).unwrap_err();
    assert!(matches!(err, PolychatError::ChatRequestFailed { .. }));
    assert!(err.to_string().contains(&url));
}

#[test]
fn test_spawn_delivers_reply() {
    let backend = MockChatBackend::replying(200, r#"{"response":"hi"}"#);

    let mut pending = client(&backend.url()).spawn("hello", Language::English);
    assert_eq!(pending.wait(Duration::from_secs(5)).unwrap(), "hi");
    // Single assignment: the reply is delivered once
    assert!(matches!(
        pending.wait(Duration::from_millis(10)),
        Err(PolychatError::ChatCancelled)
    ));
}

#[test]
fn test_cancelled_reply_is_discarded() {
    let backend = MockChatBackend::delayed(Duration::from_millis(200));

    let mut pending = client(&backend.url()).spawn("hello", Language::English);
    pending.cancel();
    assert!(matches!(
        pending.wait(Duration::from_millis(10)),
        Err(PolychatError::ChatCancelled)
    ));
}

#[test]
fn test_wait_times_out() {
    let backend = MockChatBackend::delayed(Duration::from_secs(2));

    let mut pending = client(&backend.url()).spawn("hello", Language::English);
    let err = pending.wait(Duration::from_millis(50)).unwrap_err();
    assert!(matches!(err, PolychatError::ChatTimeout { .. }));

    pending.cancel();
    assert!(matches!(
        pending.wait(Duration::from_millis(10)),
        Err(PolychatError::ChatCancelled)
    ));
}

#[test]
fn test_parse_reply_success() {
    assert_eq!(parse_reply(200, r#"{"response":"ok"}"#).unwrap(), "ok");
}

#[test]
fn test_parse_reply_malformed_success_body() {
    let err = parse_reply(200, "<html>").unwrap_err();
    assert!(err.to_string().contains("malformed reply"));
}

#[test]
fn test_parse_reply_error_without_json() {
    match parse_reply(502, "Bad Gateway\n").unwrap_err() {
        PolychatError::ChatBackend { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(
        parse_reply(500, "")
            .unwrap_err()
            .to_string()
            .contains("empty response body")
    );
}

#[test]
fn test_request_serializes_as_backend_expects() {
    let json = serde_json::to_string(&ChatRequest {
        text: "hello",
        language: "te",
    })
    .unwrap();
    assert_eq!(json, r#"{"text":"hello","language":"te"}"#);
}
