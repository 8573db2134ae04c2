pub mod covers;
pub mod database;
pub mod generator;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod questions;
pub mod store;

pub use database::InterviewDb;
pub use generator::InterviewGenerator;
pub use metrics::{get_metrics, init_metrics};
pub use store::{InterviewStore, MemoryStore};
