//! HTTP-level tests for the Gemini adapter against a local mock endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use formcheck_gemini::{
    build_analysis_request, build_text_request, GeminiClient, GeminiConfig, GeminiError, VIDEO_MP4,
};
use mockito::Matcher;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const PATH: &str = "/models/test-model:generateContent";

fn client_for(server: &mockito::ServerGuard, key: &str) -> GeminiClient {
    let config = GeminiConfig::new(key)
        .with_base_url(server.url())
        .with_model("test-model");
    GeminiClient::new(config).unwrap()
}

fn ok_body(text: &str) -> String {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

#[tokio::test]
async fn test_analysis_request_round_trips_prompt_and_bytes() {
    let mut server = mockito::Server::new_async().await;
    let video: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let expected_body = json!({
        "contents": [{
            "parts": [
                {"text": "Analyze this squat"},
                {"inlineData": {"mimeType": "video/mp4", "data": BASE64.encode(&video)}}
            ]
        }]
    });

    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(expected_body.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ok_body("**SKOR:** 80"))
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    let request = build_analysis_request(&video, "Analyze this squat", VIDEO_MP4);
    let text = client.send(&request).await.unwrap();

    assert_eq!(text, "**SKOR:** 80");
    mock.assert_async().await;

    let data = expected_body["contents"][0]["parts"][1]["inlineData"]["data"]
        .as_str()
        .unwrap();
    assert_eq!(BASE64.decode(data).unwrap(), video);
}

#[tokio::test]
async fn test_http_429_maps_to_rate_limited() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("quota")
        .create_async()
        .await;

    let err = client_for(&server, "k")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::RateLimited));
    assert_eq!(err.status_code(), Some(429));
}

#[tokio::test]
async fn test_other_status_carries_code() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"message":"API key invalid","status":"PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let err = client_for(&server, "bad")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    match err {
        GeminiError::Http { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("API key invalid"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_inside_200_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"error":{"code":500,"message":"internal","status":"INTERNAL"}}"#)
        .create_async()
        .await;

    let err = client_for(&server, "k")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::Api { code: 500, .. }));
}

#[tokio::test]
async fn test_blank_candidate_text_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(ok_body("   "))
        .create_async()
        .await;

    let err = client_for(&server, "k")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::EmptyResponse(_)));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server, "k")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::Decode(_)));
}

#[tokio::test]
async fn test_empty_key_fails_without_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server, "")
        .send(&build_text_request("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::MissingApiKey(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_clones_both_complete() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(ok_body("ok"))
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server, "k");
    let other = client.clone();
    let request = build_text_request("hi");
    let (a, b) = tokio::join!(client.send(&request), other.send(&request));

    assert_eq!(a.unwrap(), "ok");
    assert_eq!(b.unwrap(), "ok");
    mock.assert_async().await;
}

/// Tracks how many requests a [`slow_server`] is handling at once.
#[derive(Default)]
struct Load {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    served: AtomicUsize,
}

async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

/// Answers every request with `ok` after `delay`, one connection per request.
async fn slow_server(delay: Duration) -> (String, Arc<Load>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let load = Arc::new(Load::default());

    let shared = Arc::clone(&load);
    tokio::spawn(async move {
        loop {
            let (mut stream, _) = listener.accept().await.unwrap();
            let load = Arc::clone(&shared);
            tokio::spawn(async move {
                read_request(&mut stream).await;
                let now = load.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                load.peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                load.in_flight.fetch_sub(1, Ordering::SeqCst);
                load.served.fetch_add(1, Ordering::SeqCst);

                let body = ok_body("ok");
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            });
        }
    });

    (url, load)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clones_never_overlap_requests() {
    let delay = Duration::from_millis(100);
    let (url, load) = slow_server(delay).await;
    let client = GeminiClient::new(
        GeminiConfig::new("k")
            .with_base_url(url)
            .with_model("test-model"),
    )
    .unwrap();
    let request = build_text_request("hi");

    let started = tokio::time::Instant::now();
    let calls: Vec<_> = (0..3)
        .map(|_| {
            let client = client.clone();
            let request = request.clone();
            tokio::spawn(async move { client.send(&request).await })
        })
        .collect();
    for call in calls {
        assert_eq!(call.await.unwrap().unwrap(), "ok");
    }

    assert_eq!(load.served.load(Ordering::SeqCst), 3);
    assert_eq!(load.peak.load(Ordering::SeqCst), 1);
    assert!(started.elapsed() >= delay * 3);
}
