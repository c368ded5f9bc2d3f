//! Application layer: scoring orchestration
//!
//! Coordinates the domain's consensus machinery against asynchronous
//! evaluator panels. The [`ports`] module defines the interfaces the
//! infrastructure layer implements; the [`use_cases`] module drives the
//! item and respondent scoring pipelines through them.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::ScoringParams;
pub use ports::evaluator::{Evaluator, EvaluatorError};
pub use ports::progress::{NoProgress, ScoringProgress};
pub use use_cases::{
    ItemScore, RespondentReport, ScoreItemError, ScoreItemUseCase, ScoreRespondentError,
    ScoreRespondentUseCase,
};
