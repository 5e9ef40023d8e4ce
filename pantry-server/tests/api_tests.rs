//! Integration tests for health, accounts, recipe search, favorites and uploads

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{error_code, request, send, setup_app, signup};
use serde_json::json;

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "pantry-server");
    assert!(body["version"].is_string());
    assert_eq!(body["database"], "ok");
    assert_eq!(body["recipes"], 12);
}

#[tokio::test]
async fn test_buildinfo() {
    let (_dir, app) = setup_app().await;
    let (status, body) = send(&app, request("GET", "/api/buildinfo", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["module"], "pantry-server");
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_signup_login_me_logout() {
    let (_dir, app) = setup_app().await;
    signup(&app, "cook@example.com").await;

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/login", None, Some(json!({"email": "COOK@example.com", "password": "secret123"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["email"], "cook@example.com");

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "cook@example.com");

    let (status, _) = send(&app, request("POST", "/api/auth/logout", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, request("GET", "/api/auth/me", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_unknown_token_rejected_on_optional_login_routes() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(
        &app,
        request("POST", "/api/recipes/search", Some("nope"), Some(json!({"ingredients": ["garlic"]}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");

    let (status, body) = send(&app, request("GET", "/api/wall/posts", Some("nope"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");

    // Without a header both routes still serve anonymous callers
    let (status, _) = send(&app, request("GET", "/api/wall/posts", None, None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_ascii_email_can_log_in() {
    let (_dir, app) = setup_app().await;
    signup(&app, "ÉLODIE@example.com").await;

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/login", None, Some(json!({"email": "ÉLODIE@example.com", "password": "secret123"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["user"]["email"], "élodie@example.com");
}

#[tokio::test]
async fn test_signup_conflict_and_validation() {
    let (_dir, app) = setup_app().await;
    signup(&app, "twice@example.com").await;

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/signup", None, Some(json!({"email": "Twice@Example.com", "password": "another1"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "CONFLICT");

    let (status, _) = send(
        &app,
        request("POST", "/api/auth/signup", None, Some(json!({"email": "nope", "password": "secret123"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request("POST", "/api/auth/signup", None, Some(json!({"email": "short@example.com", "password": "123"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let (_dir, app) = setup_app().await;
    signup(&app, "locked@example.com").await;

    let (status, body) = send(
        &app,
        request("POST", "/api/auth/login", None, Some(json!({"email": "locked@example.com", "password": "wrong-one"}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "UNAUTHORIZED");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_envelope() {
    let (_dir, app) = setup_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "BAD_REQUEST");
}

// =============================================================================
// Recipe search
// =============================================================================

#[tokio::test]
async fn test_search_requires_ingredients() {
    let (_dir, app) = setup_app().await;
    let (status, body) = send(
        &app,
        request("POST", "/api/recipes/search", None, Some(json!({"ingredients": ["  "]}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("at least one ingredient"));
}

#[tokio::test]
async fn test_search_ranks_and_filters() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(
        &app,
        request("POST", "/api/recipes/search", None, Some(json!({"ingredients": ["garlic", "lime"]}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty());
    // Black bean bowl has both garlic and lime, so it leads
    assert_eq!(results[0]["id"], "11");
    assert_eq!(results[0]["matched_ingredients"], json!(["garlic", "lime"]));
    assert_eq!(body["summary"]["title"], format!("Found {} recipes", results.len()));

    let (_, body) = send(
        &app,
        request(
            "POST",
            "/api/recipes/search",
            None,
            Some(json!({"ingredients": ["garlic", "lime"], "diet": "vegan", "cuisine": "mexican"})),
        ),
    )
    .await;
    let ids: Vec<&str> = body["results"].as_array().unwrap().iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["11"]);
}

#[tokio::test]
async fn test_refine_drops_filtered_and_unknown_ids() {
    let (_dir, app) = setup_app().await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/recipes/refine",
            None,
            Some(json!({"recipe_ids": ["4", "1", "missing", "8"], "diet": "vegetarian"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe_ids"], json!(["1", "8"]));
}

#[tokio::test]
async fn test_unknown_filter_value_rejected() {
    let (_dir, app) = setup_app().await;
    let (status, _) = send(
        &app,
        request("POST", "/api/recipes/search", None, Some(json!({"ingredients": ["rice"], "diet": "keto"}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suggestions() {
    let (_dir, app) = setup_app().await;
    let (status, body) = send(&app, request("GET", "/api/recipes/suggestions?q=pep", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestions"], json!(["Pepper", "Bell Pepper"]));
}

#[tokio::test]
async fn test_recipe_detail_and_missing() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, request("GET", "/api/recipes/1", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Classic Margherita Pasta");
    assert_eq!(body["steps"].as_array().unwrap().len(), 5);
    assert_eq!(body["is_favorite"], false);

    let (status, body) = send(&app, request("GET", "/api/recipes/999", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test]
async fn test_favorites_require_login() {
    let (_dir, app) = setup_app().await;
    let (status, _) = send(&app, request("GET", "/api/favorites", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_favorites_flow_marks_search_results() {
    let (_dir, app) = setup_app().await;
    let token = signup(&app, "fav@example.com").await;

    let (status, body) = send(&app, request("PUT", "/api/favorites/4", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);

    let (_, body) = send(&app, request("PUT", "/api/favorites/4", Some(&token), None)).await;
    assert_eq!(body["changed"], false);

    let (status, body) = send(&app, request("PUT", "/api/favorites/999", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_FOUND");

    let (_, body) = send(
        &app,
        request("POST", "/api/recipes/search", Some(&token), Some(json!({"ingredients": ["tomato"]}))),
    )
    .await;
    for result in body["results"].as_array().unwrap() {
        assert_eq!(result["is_favorite"], result["id"] == "4");
    }

    let (_, body) = send(&app, request("GET", "/api/recipes/4", Some(&token), None)).await;
    assert_eq!(body["is_favorite"], true);

    let (_, body) = send(&app, request("GET", "/api/favorites", Some(&token), None)).await;
    assert_eq!(body["recipes"][0]["id"], "4");

    let (status, body) = send(&app, request("DELETE", "/api/favorites/4", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_favorite"], false);

    let (_, body) = send(&app, request("GET", "/api/favorites", Some(&token), None)).await;
    assert!(body["recipes"].as_array().unwrap().is_empty());
}

// =============================================================================
// Uploads
// =============================================================================

fn upload(token: &str, filename: &str, content_type: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/uploads?filename={filename}"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .unwrap()
}

#[tokio::test]
async fn test_upload_then_serve() {
    let (_dir, app) = setup_app().await;
    let token = signup(&app, "photo@example.com").await;

    let (status, body) = send(&app, upload(&token, "my%20dish.png", "image/png", b"\x89PNG fake".to_vec())).await;
    assert_eq!(status, StatusCode::CREATED);
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("-my-dish.png"));

    let response = tower::util::ServiceExt::oneshot(app.clone(), request("GET", &url, None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG fake");
}

#[tokio::test]
async fn test_upload_rejects_non_image_and_oversized() {
    let (_dir, app) = setup_app().await;
    let token = signup(&app, "big@example.com").await;

    let (status, body) = send(&app, upload(&token, "notes.txt", "text/plain", b"hello".to_vec())).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_code(&body), "UNSUPPORTED_MEDIA_TYPE");

    let too_big = vec![0u8; pantry_server::storage::MAX_IMAGE_BYTES + 1];
    let (status, body) = send(&app, upload(&token, "huge.jpg", "image/jpeg", too_big)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_code(&body), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_upload_rejects_html_declared_as_png() {
    let (dir, app) = setup_app().await;
    let token = signup(&app, "sneaky@example.com").await;

    let (status, body) = send(
        &app,
        upload(&token, "evil.html", "image/png", b"<script>alert(1)</script>".to_vec()),
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{body}");
    assert_eq!(error_code(&body), "UNSUPPORTED_MEDIA_TYPE");

    let uploads = dir.path().join("uploads");
    let stored = std::fs::read_dir(&uploads).map(|entries| entries.count()).unwrap_or(0);
    assert_eq!(stored, 0, "nothing should be written for a rejected upload");
}

#[tokio::test]
async fn test_upload_requires_login() {
    let (_dir, app) = setup_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/uploads?filename=a.png")
        .header(header::CONTENT_TYPE, "image/png")
        .body(Body::from("x"))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
