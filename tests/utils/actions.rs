use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use super::setup::TestApp;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestApp {
    /// Open a session and return its bearer token
    pub async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .post("/session", serde_json::json!({ "username": username }), None)
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"]
            .as_str()
            .expect("session response carries a token")
            .to_string()
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let (status, raw) = self.send("GET", path, None, None).await;
        (status, parse_json(&raw))
    }

    /// GET for plain-text endpoints such as the report routes
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        self.send("GET", path, None, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, raw) = self.send("POST", path, Some(body), token).await;
        (status, parse_json(&raw))
    }

    pub async fn put(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, raw) = self.send("PUT", path, Some(body), token).await;
        (status, parse_json(&raw))
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Value,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let (status, raw) = self.send("PATCH", path, Some(body), token).await;
        (status, parse_json(&raw))
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let (status, raw) = self.send("DELETE", path, None, token).await;
        (status, parse_json(&raw))
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

fn parse_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| panic!("expected JSON body, got {raw:?}: {e}"))
}
