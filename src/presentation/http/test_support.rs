//! Router-level helpers: an app wired to in-memory ports plus request builders.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use uuid::Uuid;

use crate::bootstrap::app_context::{AppContext, AppServices};
use crate::bootstrap::config::Config;
use crate::presentation::http::api_router;
use crate::presentation::http::auth::issue_token;
use crate::testing::{FakeMediaStore, InMemoryUserRepository, InMemoryWearRepository};

const BOUNDARY: &str = "faculty-wear-test-boundary";

/// Filesystem-backed config; `pairs` take precedence over the defaults.
pub fn test_config(pairs: &[(&str, &str)]) -> Config {
    let defaults = [
        ("MEDIA_BACKEND", "filesystem"),
        ("JWT_SECRET", "router-test-secret"),
    ];
    Config::from_source(|key| {
        pairs
            .iter()
            .chain(defaults.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap()
}

pub fn test_app(pairs: &[(&str, &str)]) -> (Router, AppContext, Arc<FakeMediaStore>) {
    let media = Arc::new(FakeMediaStore::default());
    let services = AppServices::new(
        Arc::new(InMemoryWearRepository::default()),
        Arc::new(InMemoryUserRepository::default()),
        media.clone(),
    );
    let ctx = AppContext::new(test_config(pairs), services);
    (api_router(ctx.clone()), ctx, media)
}

/// Adds a bearer token for a fresh user id.
pub fn authed(ctx: &AppContext, mut req: Request<Body>) -> Request<Body> {
    let token = issue_token(&ctx.cfg, Uuid::new_v4()).unwrap();
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    req
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[derive(Default)]
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.buf.extend_from_slice(bytes);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.buf
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.buf))
            .unwrap()
    }
}
