//! Application startup and lifecycle management.
//!
//! Wires the configured text provider and interview store into the HTTP
//! router and runs it until a shutdown signal arrives.

use crate::config::{InterviewConfig, ProviderKind, StoreBackend};
use crate::handlers::{
    acknowledge, generate_interview, health_check, metrics_handler, preflight, readiness_check,
    GENERATE_PATH,
};
use crate::middleware::http_metrics_middleware;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use crate::services::{init_metrics, InterviewDb, InterviewGenerator, InterviewStore, MemoryStore};
use axum::{
    http::{header, HeaderValue},
    middleware::from_fn,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: InterviewGenerator,
    pub store: Arc<dyn InterviewStore>,
}

impl AppState {
    /// Assemble state from an explicit provider, store and handler profile.
    pub fn new(
        provider: Arc<dyn TextProvider>,
        store: Arc<dyn InterviewStore>,
        profile: crate::config::HandlerProfile,
        cover_images: Vec<String>,
    ) -> Self {
        let generator = InterviewGenerator::new(provider, store.clone(), profile, cover_images);
        Self { generator, store }
    }
}

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState) -> Router {
    let profile = state.generator.profile();

    let mut generate_route = get(acknowledge).post(generate_interview);
    if profile.allow_cross_origin {
        generate_route = generate_route.options(preflight);
    }

    let mut api = Router::new().route(GENERATE_PATH, generate_route);
    if profile.allow_cross_origin {
        // OPTIONS is answered by `preflight`; every other response just gets the origin
        api = api.layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));
    }

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .merge(api)
        .with_state(state)
        .layer(from_fn(http_metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
}

fn build_provider(config: &InterviewConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    match config.genai.provider {
        ProviderKind::Gemini => {
            let mut gemini_config = GeminiConfig::new(
                config.genai.api_key.clone().unwrap_or_default(),
                config.genai.text_model.clone(),
            );
            gemini_config.timeout = Duration::from_secs(config.genai.request_timeout_secs);

            let provider = GeminiTextProvider::new(gemini_config)
                .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e.to_string())))?;
            tracing::info!(
                model = %config.genai.text_model,
                "Initialized Gemini text provider"
            );
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock text provider; questions are canned");
            Ok(Arc::new(MockTextProvider::new()))
        }
    }
}

async fn build_store(config: &InterviewConfig) -> Result<Arc<dyn InterviewStore>, AppError> {
    match config.store.backend {
        StoreBackend::Mongodb => {
            let db = InterviewDb::connect(
                &config.mongodb.uri,
                &config.mongodb.database,
                &config.store.collection,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;

            db.initialize_indexes().await.map_err(|e| {
                tracing::error!("Failed to initialize database indexes: {}", e);
                e
            })?;

            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory interview store; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: InterviewConfig) -> Result<Self, AppError> {
        config.validate()?;
        init_metrics();

        let provider = build_provider(&config)?;
        let store = build_store(&config).await?;
        let state = AppState::new(provider, store, config.profile, config.cover_images.clone());

        tracing::info!(
            validate_request = config.profile.validate_request,
            attach_cover_image = config.profile.attach_cover_image,
            allow_cross_origin = config.profile.allow_cross_origin,
            "Handler profile"
        );

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Interview service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
