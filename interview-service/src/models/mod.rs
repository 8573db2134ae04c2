//! Domain models for the interview service.

pub mod interview;

pub use interview::{split_techstack, Amount, InterviewParams, InterviewRecord, InterviewRequest};
