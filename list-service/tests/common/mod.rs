#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use axum::http::HeaderValue;
use list_service::inbound::http::router::create_router;
use list_service::inbound::http::router::AppState;
use list_service::outbound::repositories::InMemoryRepository;
use serde_json::json;
use serde_json::Value;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-key-at-least-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-key-at-least-32-bytes";
pub const CLIENT_ORIGIN: &str = "http://localhost:3000";

/// Test application that spawns a real server on the in-memory backend
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Direct handle on storage, for arranging state the API cannot create.
    pub repo: InMemoryRepository,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repo = InMemoryRepository::new();
        let storage = Arc::new(repo.clone());
        let authenticator = Arc::new(Authenticator::new(ACCESS_SECRET, REFRESH_SECRET));

        let state = AppState::new(
            Arc::clone(&storage),
            Arc::clone(&storage),
            storage,
            authenticator,
            false,
            time::Duration::days(7),
        );
        let router = create_router(state, HeaderValue::from_static(CLIENT_ORIGIN));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            repo,
        }
    }

    /// Register a user and return the access token
    pub async fn signup_token(&self, email: &str) -> String {
        let response = self
            .post("/api/auth/signup")
            .json(&json!({
                "email": email,
                "password": "secret123",
                "name": "Tester"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Create a list owned by the token holder and return its id
    pub async fn create_list(&self, token: &str, body: Value) -> String {
        let response = self
            .post_authenticated("/api/lists", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["list"]["id"].as_str().expect("list id missing").to_string()
    }

    /// Add an item to a list and return its id
    pub async fn create_item(&self, token: &str, list_id: &str, body: Value) -> String {
        let response = self
            .post_authenticated(&format!("/api/lists/{}/items", list_id), token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["item"]["id"].as_str().expect("item id missing").to_string()
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
