//! Use cases orchestrating the scoring pipeline

pub mod score_item;
pub mod score_respondent;

pub use score_item::{ItemScore, ScoreItemError, ScoreItemUseCase};
pub use score_respondent::{RespondentReport, ScoreRespondentError, ScoreRespondentUseCase};
