mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::STRONG_PASSWORD;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "alice",
            "password": STRONG_PASSWORD,
            "confirm_password": STRONG_PASSWORD,
            "role": "analyst"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "analyst");
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    app.register("alice", "user").await;

    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "alice",
            "password": STRONG_PASSWORD
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let cases = [
        (json!({"username": "ab", "password": STRONG_PASSWORD}), "at least 3"),
        (json!({"username": "bad name", "password": STRONG_PASSWORD}), "letters, numbers"),
        (json!({"username": "alice", "password": "Abc1!"}), "at least 8"),
        (json!({"username": "alice", "password": "Abcdefg1"}), "special character"),
        (
            json!({"username": "alice", "password": STRONG_PASSWORD, "confirm_password": "Other1!x"}),
            "do not match",
        ),
        (
            json!({"username": "alice", "password": STRONG_PASSWORD, "role": "root"}),
            "Unknown role",
        ),
    ];

    for (payload, expected) in cases {
        let response = app
            .post("/api/accounts")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{payload}");

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let message = body["data"]["message"].as_str().unwrap();
        assert!(message.contains(expected), "{message}");
    }
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("alice", "admin").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({"username": "alice", "password": STRONG_PASSWORD}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["token"].as_str().unwrap().len(), 64);
    assert!(body["data"]["expires_at"].is_string());
    assert_eq!(body["data"]["message"], "Login successful! Welcome, alice.");
}

#[tokio::test]
async fn test_login_failures_lock_account() {
    let app = TestApp::spawn().await;
    app.register("alice", "user").await;

    for _ in 0..2 {
        let response = app
            .post("/api/auth/login")
            .json(&json!({"username": "alice", "password": "Wrong1!x"}))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .post("/api/auth/login")
        .json(&json!({"username": "alice", "password": "Wrong1!x"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::LOCKED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "Account locked. Try again in 300 seconds"
    );

    let response = app
        .get("/api/accounts/alice/lockout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["locked"], true);
    assert!(body["data"]["remaining_seconds"].as_i64().unwrap() > 0);

    app.db
        .backdate_last_failure("alice", Utc::now() - Duration::seconds(300))
        .await;

    let response = app
        .get("/api/accounts/alice/lockout")
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["locked"], false);
    assert_eq!(body["data"]["remaining_seconds"], 0);

    app.login("alice").await;
}

#[tokio::test]
async fn test_lockout_status_for_unknown_username() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/accounts/nobody/lockout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["locked"], false);
}

#[tokio::test]
async fn test_password_strength() {
    let app = TestApp::spawn().await;

    for (password, expected) in [("abc", "weak"), ("Abcdef12", "medium"), ("Abcdef1!", "strong")] {
        let response = app
            .post("/api/password-strength")
            .json(&json!({"password": password}))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["strength"], expected, "{password}");
    }
}

#[tokio::test]
async fn test_current_session_and_logout() {
    let app = TestApp::spawn().await;
    app.register("alice", "analyst").await;
    let token = app.login("alice").await;

    let response = app
        .get_authenticated("/api/auth/session", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "analyst");

    let response = app
        .post_authenticated("/api/auth/logout", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated("/api/auth/session", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/auth/session")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get_authenticated("/api/auth/session", "not-a-real-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
}

#[tokio::test]
async fn test_list_accounts_requires_admin() {
    let app = TestApp::spawn().await;
    app.register("root_admin", "admin").await;
    app.register("bob", "user").await;

    let user_token = app.login("bob").await;
    let response = app
        .get_authenticated("/api/admin/accounts", &user_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = app.login("root_admin").await;
    let response = app
        .get_authenticated("/api/admin/accounts", &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let accounts = body["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["username"], "bob");
    assert_eq!(accounts[1]["username"], "root_admin");
    assert!(accounts[0].get("password_hash").is_none());
}
