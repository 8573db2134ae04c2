//! Full application startup on a random port.

use interview_service::config::{
    default_cover_images, GenaiConfig, HandlerProfile, InterviewConfig, MongoConfig, ProviderKind,
    StoreBackend, StoreConfig,
};
use interview_service::startup::Application;
use reqwest::Client;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::time::Duration;

fn offline_config() -> InterviewConfig {
    InterviewConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            log_level: "error".to_string(),
        },
        otlp_endpoint: None,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            collection: "interviews".to_string(),
        },
        mongodb: MongoConfig {
            uri: String::new(),
            database: "interview_test_db".to_string(),
        },
        genai: GenaiConfig {
            provider: ProviderKind::Mock,
            api_key: None,
            text_model: "gemini-2.0-flash-001".to_string(),
            request_timeout_secs: 5,
        },
        profile: HandlerProfile::default(),
        cover_images: default_cover_images(),
    }
}

/// Spawn the application and return its base URL.
async fn spawn_app(config: InterviewConfig) -> String {
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let address = format!("http://127.0.0.1:{}", app.port());

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    // Wait for the server by polling the health endpoint
    let client = Client::new();
    for _ in 0..50 {
        if client
            .get(format!("{}/health", address))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    address
}

#[tokio::test]
async fn serves_generate_endpoint_end_to_end() {
    let address = spawn_app(offline_config()).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/vapi/generate", address))
        .json(&json!({
            "type": "behavioural",
            "role": "engineering manager",
            "level": "staff",
            "techstack": "Kubernetes",
            "amount": 3,
            "userid": "u9"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn gemini_without_key_fails_to_build() {
    let mut config = offline_config();
    config.genai.provider = ProviderKind::Gemini;

    let result = Application::build(config).await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires MongoDB on localhost:27017"]
async fn builds_against_mongodb() {
    let mut config = offline_config();
    config.store.backend = StoreBackend::Mongodb;
    config.mongodb.uri = "mongodb://localhost:27017".to_string();

    let address = spawn_app(config).await;

    let response = Client::new()
        .get(format!("{}/ready", address))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
}
