use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use book_recommendation_service::{
    AppState, BackendError, FallbackMarkerPolicy, GenerativeBackend, RecommenderOptions,
    build_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Backend that answers with a fixed text, or fails when given `None`
struct FakeBackend {
    answer: Option<&'static str>,
    calls: AtomicUsize,
}

impl FakeBackend {
    fn answering(answer: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer: Some(answer),
            calls: AtomicUsize::new(0),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            answer: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .map(str::to_string)
            .ok_or_else(|| BackendError::Transport("connection refused".into()))
    }
}

fn app(backend: Arc<FakeBackend>, options: RecommenderOptions) -> Router {
    build_router(AppState::new(backend, options))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn recommend(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/recommendations", Some(body)).await
}

#[tokio::test]
async fn scary_query_with_backend_down_uses_marked_fallback() {
    let backend = FakeBackend::unreachable();
    let (status, body) = recommend(
        app(backend.clone(), RecommenderOptions::default()),
        json!({ "query": "I want something scary" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["query"], "I want something scary");
    assert_eq!(body["recommendations"][0]["bookId"], "18");
    assert_eq!(body["recommendations"][0]["confidence"], 0.9);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_query_is_rejected() {
    let backend = FakeBackend::unreachable();
    let app = app(backend.clone(), RecommenderOptions::default());

    let (status, body) = recommend(app.clone(), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Query is required" }));

    let (status, _) = recommend(app, json!({ "query": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn whitespace_query_is_sent_to_the_model() {
    let backend = FakeBackend::unreachable();
    let (status, body) = recommend(
        app(backend.clone(), RecommenderOptions::default()),
        json!({ "query": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "   ");
    assert_eq!(body["source"], "fallback");
    let book_ids: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["bookId"].as_str().unwrap())
        .collect();
    assert_eq!(book_ids, vec!["1", "6", "10", "11"]);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn model_answer_is_returned_without_marker() {
    let backend = FakeBackend::answering(
        r#"Great question! Here is what I found:
[
  {"id": "1", "bookId": "2", "reason": "A lone astronaut and a lot of science.", "confidence": 0.96},
  {"id": "2", "bookId": "32", "reason": "Quiet, thoughtful science fiction.", "confidence": 0.81}
]
Happy reading!"#,
    );

    let (status, body) = recommend(
        app(backend, RecommenderOptions::default()),
        json!({ "query": "thoughtful science fiction" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("source").is_none());
    assert_eq!(
        body["recommendations"],
        json!([
            {"id": "1", "bookId": "2", "reason": "A lone astronaut and a lot of science.", "confidence": 0.96},
            {"id": "2", "bookId": "32", "reason": "Quiet, thoughtful science fiction.", "confidence": 0.81}
        ])
    );
}

#[tokio::test]
async fn unknown_books_from_model_are_filtered() {
    let backend = FakeBackend::answering(
        r#"[
  {"id": "1", "bookId": "404", "reason": "Does not exist.", "confidence": 0.99},
  {"id": "2", "bookId": "22", "reason": "A classic adventure.", "confidence": 0.9}
]"#,
    );

    let (_, body) = recommend(
        app(backend, RecommenderOptions::default()),
        json!({ "query": "adventure" }),
    )
    .await;

    assert_eq!(
        body["recommendations"],
        json!([{"id": "1", "bookId": "22", "reason": "A classic adventure.", "confidence": 0.9}])
    );
}

#[tokio::test]
async fn unparsable_answer_falls_back_per_marker_policy() {
    let query = json!({ "query": "xyz123" });

    let (status, body) = recommend(
        app(
            FakeBackend::answering("Sorry, I can't help."),
            RecommenderOptions::default(),
        ),
        query.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("source").is_none());
    let confidences: Vec<f64> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["confidence"].as_f64().unwrap())
        .collect();
    assert_eq!(confidences, vec![0.80, 0.75, 0.70, 0.68]);

    let (_, body) = recommend(
        app(
            FakeBackend::answering("Sorry, I can't help."),
            RecommenderOptions {
                marker_policy: FallbackMarkerPolicy::Always,
                validate_book_ids: true,
            },
        ),
        query,
    )
    .await;
    assert_eq!(body["source"], "fallback");
}

#[tokio::test]
async fn every_response_allows_any_origin() {
    let app = app(FakeBackend::unreachable(), RecommenderOptions::default());

    for body in [json!({}), json!({ "query": "funny" })] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommendations")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}

#[tokio::test]
async fn books_can_be_listed_and_fetched() {
    let app = app(FakeBackend::unreachable(), RecommenderOptions::default());

    let (status, body) = send(app.clone(), "GET", "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 70);

    let (status, body) = send(app.clone(), "GET", "/books/18", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Gone Girl");
    assert_eq!(body["coverImage"], "/book-covers/gone-girl.jpg");
    assert_eq!(body["publishedYear"], 2012);

    let (status, body) = send(app, "GET", "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found");
}

#[tokio::test]
async fn reading_list_lifecycle() {
    let app = app(FakeBackend::unreachable(), RecommenderOptions::default());

    let (status, body) = send(app.clone(), "GET", "/reading-lists?userId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, created) = send(
        app.clone(),
        "POST",
        "/reading-lists",
        Some(json!({ "userId": "42", "name": "Spooky Season", "bookIds": ["34", "18"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["description"], "");
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/reading-lists/{id}");

    let (status, fetched) = send(app.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        app.clone(),
        "PUT",
        &uri,
        Some(json!({ "bookIds": ["34", "18", "37", "34"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["bookIds"], json!(["34", "18", "37"]));
    assert_eq!(updated["name"], "Spooky Season");

    let (status, body) = send(app.clone(), "PUT", &uri, Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, body) = send(app.clone(), "GET", "/reading-lists?userId=42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reading_list_with_unknown_book_is_rejected() {
    let app = app(FakeBackend::unreachable(), RecommenderOptions::default());

    let (status, body) = send(
        app,
        "POST",
        "/reading-lists",
        Some(json!({ "userId": "1", "name": "Mystery", "bookIds": ["999"] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown book id: 999");
}
