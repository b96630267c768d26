//! Text analysis and scoring

pub mod evaluator;
pub mod feedback;
pub mod grammar;
pub mod keywords;
pub mod matching;
pub mod scoring;
pub mod sections;
pub mod text_processor;

pub use evaluator::{EvaluationResult, Evaluator};
pub use scoring::{ScoreArea, ScoreSet};
