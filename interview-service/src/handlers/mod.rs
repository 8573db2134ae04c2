//! HTTP handlers for interview-service.

pub mod generate;
pub mod health;
pub mod metrics;

pub use generate::{acknowledge, generate_interview, preflight, GENERATE_PATH};
pub use health::{health_check, readiness_check};
pub use metrics::metrics_handler;
