#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use interview_service::config::HandlerProfile;
use interview_service::services::providers::mock::MockTextProvider;
use interview_service::services::MemoryStore;
use interview_service::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;

pub const GENERATE_URI: &str = "/api/vapi/generate";
pub const TEST_COVER: &str = "/spotify.png";

/// Router wired to a scripted model and an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new(provider: MockTextProvider) -> Self {
        Self::with_parts(provider, MemoryStore::new(), HandlerProfile::default())
    }

    pub fn with_parts(
        provider: MockTextProvider,
        store: MemoryStore,
        profile: HandlerProfile,
    ) -> Self {
        let provider = Arc::new(provider);
        let store = Arc::new(store);
        let state = AppState::new(
            provider.clone(),
            store.clone(),
            profile,
            vec![TEST_COVER.to_string()],
        );

        Self {
            router: build_router(state),
            provider,
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        use tower::util::ServiceExt;

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn post_json(&self, body: &Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri(GENERATE_URI)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

pub fn lenient_profile() -> HandlerProfile {
    HandlerProfile {
        validate_request: false,
        attach_cover_image: false,
        allow_cross_origin: false,
    }
}

pub fn complete_request() -> Value {
    serde_json::json!({
        "type": "technical",
        "role": "backend engineer",
        "level": "senior",
        "techstack": "Go,Postgres",
        "amount": 5,
        "userid": "u1"
    })
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
