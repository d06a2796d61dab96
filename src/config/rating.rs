//! Rating engine configuration
//!
//! All tuning constants of the engine live here and are injected at
//! construction time, so the engine itself holds no module-level literals.

use crate::error::RatingError;
use serde::{Deserialize, Serialize};

/// What to do when a dynamic K-factor comes out negative.
///
/// With the default constants a negative K is unreachable (the smallest value
/// of `1 + amplify*U_self - dampen*U_other` is 0.5), but a custom `dampen`
/// larger than `1 + amplify*U_self` can produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeKPolicy {
    /// Keep the raw value; the entity then moves against the score gap
    #[default]
    AllowSignFlip,
    /// Floor K at zero; the entity does not move on this attempt
    ClampToZero,
}

/// How a near-zero rating gap is replaced before entering the expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpsilonPolicy {
    /// `±epsilon` following the sign of the gap (`+epsilon` for an exact tie)
    #[default]
    SignPreserving,
    /// Always `+epsilon`, even for a small negative gap
    Literal,
}

/// How the item discrimination `a` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiscriminationMode {
    /// `a = 1 / time_limit_seconds`
    #[default]
    InverseTimeLimit,
    /// A fixed judgement rate shared by every riddle of a type
    Fixed { value: f64 },
}

/// Configuration for the dual rating engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Base K-factor
    pub base_k: f64,
    /// Weight of an entity's own uncertainty on its K-factor
    pub amplify: f64,
    /// Weight of the opposing entity's uncertainty on a K-factor
    pub dampen: f64,
    /// Uncertainty removed by every attempt
    pub decay_step: f64,
    /// Uncertainty added per day of inactivity
    pub inactivity_rate: f64,
    /// Smallest rating gap fed to the expectation model
    pub epsilon: f64,
    /// Hold uncertainty fixed (simulation and analysis runs)
    pub frozen: bool,
    pub negative_k_policy: NegativeKPolicy,
    pub epsilon_policy: EpsilonPolicy,
    pub discrimination_mode: DiscriminationMode,
    /// Rating given to entities the store has never seen
    pub initial_rating: f64,
    /// Uncertainty given to entities the store has never seen
    pub initial_uncertainty: f64,
    /// Time limit used when an attempt does not carry its own
    pub default_time_limit_minutes: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            base_k: 0.0075,
            amplify: 4.0,
            dampen: 0.5,
            decay_step: 1.0 / 40.0,
            inactivity_rate: 1.0 / 30.0,
            epsilon: 1e-6,
            frozen: false,
            negative_k_policy: NegativeKPolicy::default(),
            epsilon_policy: EpsilonPolicy::default(),
            discrimination_mode: DiscriminationMode::default(),
            initial_rating: 10.0,
            initial_uncertainty: 1.0,
            default_time_limit_minutes: 20.0,
        }
    }
}

impl RatingConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            base_k: 0.005,
            amplify: 2.0,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            base_k: 0.015,
            amplify: 6.0,
            ..Self::default()
        }
    }

    /// Uncertainty held fixed, for deterministic simulation runs
    pub fn simulation() -> Self {
        Self {
            frozen: true,
            ..Self::default()
        }
    }

    /// Default time limit in seconds
    pub fn default_time_limit_seconds(&self) -> f64 {
        self.default_time_limit_minutes * 60.0
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        let non_negative = [
            ("Amplify", self.amplify),
            ("Dampen", self.dampen),
            ("Decay step", self.decay_step),
            ("Inactivity rate", self.inactivity_rate),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(configuration_error(format!(
                    "{} must be non-negative and finite, got {}",
                    name, value
                )));
            }
        }

        if !self.base_k.is_finite() || self.base_k <= 0.0 {
            return Err(configuration_error(format!(
                "Base K must be positive, got {}",
                self.base_k
            )));
        }

        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(configuration_error(format!(
                "Epsilon must be positive, got {}",
                self.epsilon
            )));
        }

        if let DiscriminationMode::Fixed { value } = self.discrimination_mode {
            if !value.is_finite() || value <= 0.0 {
                return Err(configuration_error(format!(
                    "Fixed discrimination must be positive, got {}",
                    value
                )));
            }
        }

        if !self.initial_rating.is_finite() {
            return Err(configuration_error("Initial rating must be finite".to_string()));
        }

        if !(0.0..=1.0).contains(&self.initial_uncertainty) {
            return Err(configuration_error(format!(
                "Initial uncertainty must lie in [0, 1], got {}",
                self.initial_uncertainty
            )));
        }

        if !self.default_time_limit_minutes.is_finite() || self.default_time_limit_minutes <= 0.0
        {
            return Err(configuration_error(format!(
                "Default time limit must be positive, got {}",
                self.default_time_limit_minutes
            )));
        }

        Ok(())
    }
}

fn configuration_error(message: String) -> anyhow::Error {
    RatingError::ConfigurationError { message }.into()
}
