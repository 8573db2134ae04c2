pub mod interview;

pub use interview::{AcknowledgeResponse, ErrorResponse, GenerateResponse};
