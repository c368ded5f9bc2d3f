//! Core domain primitives
//!
//! Shared error types used across the scoring pipeline.

pub mod error;

pub use error::ScoringError;
