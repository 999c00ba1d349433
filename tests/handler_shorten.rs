mod common;

use axum::http::StatusCode;
use link_shortener::application::services::LinkService;
use link_shortener::error::AppError;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_shorten_generates_code() {
    let (server, repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com/a/b/c" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert!(json["id"].is_i64());
    assert_eq!(json["longUrl"], "https://example.com/a/b/c");
    assert_eq!(json["clicks"], 0);
    assert!(json["createdAt"].is_string());
    assert!(json["lastClicked"].is_null());

    let code = json["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let (server, repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "longUrl": "https://example.com/promo",
            "customCode": "promo-2025"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_eq!(json["shortCode"], "promo-2025");
    assert!(repo.get("promo-2025").is_some());
}

#[tokio::test]
async fn test_shorten_blank_custom_code_generates_one() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com", "customCode": "   " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["shortCode"].as_str().unwrap().len(), 7);
}

#[tokio::test]
async fn test_shorten_stores_url_verbatim() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "  https://Example.com/Path?q=1#frag  " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["longUrl"],
        "https://Example.com/Path?q=1#frag"
    );
}

#[tokio::test]
async fn test_shorten_missing_long_url() {
    let (server, repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "customCode": "abc" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "longUrl is required");
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, repo) = common::make_server();

    for bad in ["not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": bad }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"]["message"],
            "Invalid URL format"
        );
    }

    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let (server, repo) = common::make_server();

    for bad in [
        "https://example.com/a\nb",
        "https://example.com/a\r\nSet-Cookie: x=1",
        "https://exa\tmple.com/",
    ] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": bad, "customCode": "ctl" }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"]["message"],
            "Invalid URL format"
        );
    }

    assert_eq!(repo.len(), 0);
    server.get("/ctl").await.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_url_too_long() {
    let (server, _repo) = common::make_server();
    let long_url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": long_url }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_invalid_json() {
    let (server, _repo) = common::make_server();

    let response = server
        .post("/api/shorten")
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_shorten_invalid_custom_code() {
    let (server, _repo) = common::make_server();

    for bad in ["has space", "slash/code", "ünïcode", "dot.code"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": "https://example.com", "customCode": bad }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_reserved_custom_code() {
    let (server, repo) = common::make_server();

    for reserved in ["api", "health", "Health", "ADMIN"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "longUrl": "https://example.com", "customCode": reserved }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<Value>()["error"]["message"],
            "This code is reserved"
        );
    }

    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code() {
    let (server, repo) = common::make_server();

    server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://first.example.com", "customCode": "taken" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://second.example.com", "customCode": "taken" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Short code already in use"
    );

    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get("taken").unwrap().long_url, "https://first.example.com");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_links() {
    let (server, repo) = common::make_server();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await
        .json::<Value>();
    let second = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await
        .json::<Value>();

    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["shortCode"], second["shortCode"]);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_storage_failure_hides_details() {
    let server = common::make_server_with(Arc::new(common::FailingLinkRepository));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com", "customCode": "abc" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["message"], "Internal server error");
    assert!(!json.to_string().contains("10.0.0.5"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_custom_code_single_winner() {
    let repo = Arc::new(common::InMemoryLinkRepository::new());
    let service = Arc::new(LinkService::new(repo.clone()));

    let mut tasks = JoinSet::new();
    for i in 0..16 {
        let service = service.clone();
        tasks.spawn(async move {
            service
                .create_link(&format!("https://example.com/{i}"), Some("race"))
                .await
        });
    }

    let mut created = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(link) => {
                assert_eq!(link.short_code, "race");
                created += 1;
            }
            Err(AppError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 15);
    assert_eq!(repo.len(), 1);
}
