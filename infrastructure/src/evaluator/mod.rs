//! Evaluator adapters implementing the application's panel port

mod scripted;

pub use scripted::ScriptedEvaluator;
