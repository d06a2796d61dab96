//! Riddle Rating - adaptive dual rating for timed puzzle attempts
//!
//! This crate jointly updates a player's skill rating and a puzzle's difficulty
//! rating from one timed, correctness-graded attempt, using a High-Speed-High-Stakes
//! score, a logistic expectation model and uncertainty-weighted K-factors.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::RatingConfig;
pub use rating::{AttemptProcessor, RatingCalculator, RatingEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
