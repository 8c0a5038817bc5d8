//! Pattern detection: marker scan, sub-conditions and the trigger verdict.

pub mod engine;
pub mod evaluator;
pub mod scanner;

pub use engine::{TriggerEngine, TriggerEvaluation, DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN};
pub use evaluator::TriggerEvaluator;
pub use scanner::*;
