use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use jsonfetch::{
    BoxError, ClientConfig, HttpRequest, HttpResponse, JsonFetchClient, JsonFetchError,
    RequestOptions, Transport,
};
use serde_json::{json, Value as JsonValue};

type Scripted = Result<HttpResponse, String>;

/// Replays a fixed sequence of outcomes and records every request.
#[derive(Clone, Default)]
struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    fallback: Option<Scripted>,
    calls: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            ..Self::default()
        }
    }

    /// Outcome returned once the script runs out.
    fn repeating(outcome: Scripted) -> Self {
        Self {
            fallback: Some(outcome),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().expect("call log mutex must not be poisoned").len()
    }

    fn call(&self, index: usize) -> HttpRequest {
        self.calls.lock().expect("call log mutex must not be poisoned")[index].clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.calls
            .lock()
            .expect("call log mutex must not be poisoned")
            .push(request);
        let next = self
            .script
            .lock()
            .expect("script mutex must not be poisoned")
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Err("script exhausted".to_owned()));
        next.map_err(BoxError::from)
    }
}

fn ok_json(status: u16, body: JsonValue) -> Scripted {
    Ok(HttpResponse {
        status,
        body: serde_json::to_vec(&body).expect("test body must encode"),
    })
}

fn client(max_retries: i64, transport: ScriptedTransport) -> JsonFetchClient<ScriptedTransport> {
    let config = ClientConfig::new("https://example.com", max_retries).expect("valid config");
    JsonFetchClient::with_transport(config, transport)
}

#[tokio::test]
async fn first_attempt_success_makes_one_call() {
    let transport = ScriptedTransport::new(vec![ok_json(200, json!({"success": true}))]);
    let client = client(2, transport.clone());

    let response = client
        .get::<JsonValue>("/test", RequestOptions::with_query([("a", 1), ("b", 2)]))
        .await
        .expect("get must succeed");

    assert_eq!(response.data, json!({"success": true}));
    assert_eq!(response.status, 200);
    assert!(response.ok);
    assert_eq!(transport.call_count(), 1);

    let call = transport.call(0);
    assert_eq!(call.method, reqwest::Method::GET);
    assert_eq!(call.url, "https://example.com/test?a=1&b=2");
    assert_eq!(call.body, None);
}

#[tokio::test]
async fn two_transport_failures_then_success() {
    let transport = ScriptedTransport::new(vec![
        Err("Fail 1".to_owned()),
        Err("Fail 2".to_owned()),
        ok_json(200, json!({"ok": true})),
    ]);
    let client = client(2, transport.clone());

    let response = client
        .get::<JsonValue>("/retry", ())
        .await
        .expect("third attempt must succeed");

    assert_eq!(response.data, json!({"ok": true}));
    assert_eq!(response.status, 200);
    assert!(response.ok);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn all_attempts_fail_with_last_message() {
    let transport = ScriptedTransport::repeating(Err("Fail".to_owned()));
    let client = client(2, transport.clone());

    let err = client
        .get::<JsonValue>("/failAll", ())
        .await
        .expect_err("every attempt fails");

    assert_eq!(transport.call_count(), 3);
    match err {
        JsonFetchError::Transport(inner) => assert_eq!(inner.to_string(), "Fail"),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn mixed_failures_propagate_the_final_kind() {
    let transport = ScriptedTransport::new(vec![
        Err("connection reset".to_owned()),
        ok_json(503, json!({"retry": "later"})),
    ]);
    let client = client(1, transport.clone());

    let err = client
        .get::<JsonValue>("/flaky", ())
        .await
        .expect_err("both attempts fail");

    assert_eq!(transport.call_count(), 2);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn status_500_with_zero_retries_makes_one_call() {
    let transport = ScriptedTransport::repeating(ok_json(500, json!({})));
    let client = client(0, transport.clone());

    let err = client
        .get::<JsonValue>("/fail", ())
        .await
        .expect_err("500 must fail");

    assert_eq!(transport.call_count(), 1);
    assert_eq!(err.to_string(), "HTTP error: 500");
}

#[tokio::test]
async fn success_stops_retrying_early() {
    let transport = ScriptedTransport::new(vec![
        ok_json(429, json!({})),
        ok_json(200, json!([1, 2, 3])),
        ok_json(200, json!("unreached")),
    ]);
    let client = client(5, transport.clone());

    let response = client
        .get::<Vec<u8>>("/items", ())
        .await
        .expect("second attempt must succeed");

    assert_eq!(response.data, vec![1, 2, 3]);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn every_attempt_resends_the_same_request() {
    let transport = ScriptedTransport::new(vec![
        Err("Fail".to_owned()),
        ok_json(201, json!({"id": 1})),
    ]);
    let client = client(1, transport.clone());

    client
        .post::<JsonValue, _>(
            "/users",
            &json!({"name": "John"}),
            RequestOptions::new().header("X-Custom", "1"),
        )
        .await
        .expect("retry must succeed");

    assert_eq!(transport.call_count(), 2);
    for index in 0..2 {
        let call = transport.call(index);
        assert_eq!(call.method, reqwest::Method::POST);
        assert_eq!(call.url, "https://example.com/users");
        assert_eq!(call.body.as_deref(), Some(br#"{"name":"John"}"#.as_slice()));
        assert_eq!(call.headers["content-type"], "application/json");
        assert_eq!(call.headers["x-custom"], "1");
    }
}

#[tokio::test]
async fn invalid_header_fails_before_any_attempt() {
    let transport = ScriptedTransport::repeating(ok_json(200, json!({})));
    let client = client(3, transport.clone());

    let err = client
        .get::<JsonValue>("/x", RequestOptions::new().header("bad header", "v"))
        .await
        .expect_err("invalid header name must fail");

    assert!(matches!(err, JsonFetchError::InvalidHeader(_)));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn shared_transport_serves_concurrent_requests() {
    let transport = Arc::new(ScriptedTransport::repeating(ok_json(200, json!({"ok": true}))));
    let config = ClientConfig::new("https://example.com", 0).expect("valid config");
    let client = JsonFetchClient::with_transport(config, Arc::clone(&transport));

    let (first, second) = tokio::join!(
        client.get::<JsonValue>("/a", ()),
        client.get::<JsonValue>("/b", ()),
    );

    assert!(first.expect("first must succeed").ok);
    assert!(second.expect("second must succeed").ok);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn empty_success_body_is_retried_then_fails_to_decode() {
    let transport = ScriptedTransport::repeating(Ok(HttpResponse {
        status: 200,
        body: Vec::new(),
    }));
    let client = client(2, transport.clone());

    let err = client
        .get::<JsonValue>("/empty", ())
        .await
        .expect_err("empty body is not JSON");

    assert_eq!(transport.call_count(), 3);
    assert!(matches!(err, JsonFetchError::Decode(_)));
}

#[tokio::test]
async fn borrowed_options_can_be_reused_across_calls() {
    let transport = ScriptedTransport::repeating(ok_json(200, json!({})));
    let client = client(0, transport.clone());
    let options = RequestOptions::new().query("page", 2).header("X-Custom", "1");

    client
        .get::<JsonValue>("/a", &options)
        .await
        .expect("first call must succeed");
    client
        .put::<JsonValue, _>("/b", &json!({}), &options)
        .await
        .expect("second call must succeed");

    assert_eq!(transport.call(0).url, "https://example.com/a?page=2");
    assert_eq!(transport.call(1).url, "https://example.com/b?page=2");
    assert_eq!(transport.call(1).headers["x-custom"], "1");
}
