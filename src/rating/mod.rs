//! Dual rating engine for timed riddle attempts
//!
//! This module provides the uncertainty tracker, dynamic K-factors, HSHS
//! scoring and the engine that sequences them, plus the storage interface and
//! a processor that serializes updates per entity.

pub mod calculator;
pub mod engine;
pub mod k_factor;
pub mod performance;
pub mod processor;
pub mod storage;
pub mod uncertainty;
pub mod updater;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator};
pub use engine::RatingEngine;
pub use k_factor::{DynamicKFactor, KFactors};
pub use performance::{PerformanceScore, PerformanceScorer};
pub use processor::AttemptProcessor;
pub use storage::{EntityStore, InMemoryEntityStore};
pub use uncertainty::UncertaintyTracker;
pub use updater::RatingUpdater;
