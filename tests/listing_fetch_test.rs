//! Listing source over a loopback HTTP server, and the runtime bridge

use std::thread;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use marketdash::domain::{Location, SourcePost, PRICE_RANGE};
use marketdash::infrastructure::listings::{
    fetch_listings, FetchError, HttpListingSource, ListingSource, FETCH_FAILED_MESSAGE,
};
use marketdash::infrastructure::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const POSTS: &str = r#"[
  {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
  {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore"},
  {"userId": 1, "id": 3, "title": "ea molestias quasi", "body": "et iusto sed quo"}
]"#;

/// Answer one request, returning the raw request text
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}/posts"), handle)
}

fn source(endpoint: String) -> HttpListingSource {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpListingSource::with_client(http, endpoint)
}

#[tokio::test]
async fn fetch_success_yields_three_records() {
    let (endpoint, server) = serve_once("200 OK", POSTS).await;
    let source = source(endpoint);
    let mut rng = StdRng::seed_from_u64(1);

    let listings = fetch_listings(&source, 3, &mut rng).await.unwrap();

    assert_eq!(listings.len(), 3);
    assert_eq!(listings[1].title, "qui est esse");
    for listing in &listings {
        assert!(PRICE_RANGE.contains(&listing.price));
        assert!(Location::ALL.contains(&listing.location));
    }

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /posts?_limit=3 "));
}

#[tokio::test]
async fn error_status_is_a_fetch_failure() {
    let (endpoint, _server) = serve_once("500 Internal Server Error", "{}").await;
    let err = source(endpoint).fetch_posts(3).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 500));
    assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn malformed_payload_is_a_fetch_failure() {
    let (endpoint, _server) = serve_once("200 OK", r#"{"posts": []}"#).await;
    let err = source(endpoint).fetch_posts(3).await.unwrap_err();
    assert!(matches!(err, FetchError::Payload(_)));
    assert_eq!(err.user_message(), FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_fetch_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source(format!("http://{addr}/posts"))
        .fetch_posts(3)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

struct FakeSource {
    posts: Option<Vec<SourcePost>>,
}

#[async_trait]
impl ListingSource for FakeSource {
    async fn fetch_posts(&self, limit: usize) -> Result<Vec<SourcePost>, FetchError> {
        match &self.posts {
            Some(posts) => Ok(posts.iter().take(limit).cloned().collect()),
            None => Err(FetchError::Payload("simulated network error".into())),
        }
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}

fn posts(n: u64) -> Vec<SourcePost> {
    (1..=n)
        .map(|id| SourcePost {
            id,
            title: format!("post {id}"),
        })
        .collect()
}

fn wait_for_event(bridge: &RuntimeBridge) -> RuntimeEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = bridge.poll_events().into_iter().next() {
            return event;
        }
        assert!(Instant::now() < deadline, "no event from worker");
        thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn bridge_reports_loaded_listings() {
    let bridge = RuntimeBridge::new(Box::new(FakeSource { posts: Some(posts(5)) }), Some(3)).unwrap();
    bridge.send(RuntimeCommand::FetchListings { limit: 3 }).unwrap();

    match wait_for_event(&bridge) {
        RuntimeEvent::ListingsLoaded { listings } => {
            assert_eq!(listings.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn bridge_reports_failure_message() {
    let bridge = RuntimeBridge::new(Box::new(FakeSource { posts: None }), None).unwrap();
    bridge.send(RuntimeCommand::FetchListings { limit: 3 }).unwrap();

    assert_eq!(
        wait_for_event(&bridge),
        RuntimeEvent::ListingsFailed {
            message: "Failed to fetch listings".to_string()
        }
    );
}

#[test]
fn seeded_bridges_agree() {
    let fetch = |seed| {
        let bridge =
            RuntimeBridge::new(Box::new(FakeSource { posts: Some(posts(4)) }), Some(seed)).unwrap();
        bridge.send(RuntimeCommand::FetchListings { limit: 4 }).unwrap();
        wait_for_event(&bridge)
    };
    assert_eq!(fetch(11), fetch(11));
}

#[test]
fn shutdown_closes_command_channel() {
    let bridge = RuntimeBridge::new(Box::new(FakeSource { posts: None }), None).unwrap();
    bridge.send(RuntimeCommand::Shutdown).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while bridge.send(RuntimeCommand::FetchListings { limit: 1 }).is_ok() {
        assert!(Instant::now() < deadline, "worker did not stop");
        thread::sleep(Duration::from_millis(10));
    }
    assert!(bridge.poll_events().is_empty());
}
