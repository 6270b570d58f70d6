use serde::{Deserialize, Serialize};

use super::super::domain::FactorKind;

/// Raw factor values below this default are called out in reasoning.
pub const DEFAULT_ATTENTION_THRESHOLD: f64 = 60.0;

/// Per-factor weights for the composite score. Weights need not sum to one;
/// the engine divides the weighted sum by the sum of weights it applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub availability: f64,
    pub maintenance: f64,
    pub fitness: f64,
    pub branding: f64,
    pub cleaning: f64,
    pub priority: f64,
}

impl FactorWeights {
    /// Weight 1.0 on every factor, a plain mean.
    pub const fn uniform() -> Self {
        Self {
            availability: 1.0,
            maintenance: 1.0,
            fitness: 1.0,
            branding: 1.0,
            cleaning: 1.0,
            priority: 1.0,
        }
    }

    pub const fn get(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::Availability => self.availability,
            FactorKind::Maintenance => self.maintenance,
            FactorKind::Fitness => self.fitness,
            FactorKind::Branding => self.branding,
            FactorKind::Cleaning => self.cleaning,
            FactorKind::Priority => self.priority,
        }
    }

    pub fn sum(&self) -> f64 {
        FactorKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Tier cutoffs over the composite score. Scores at or above
/// `recommended_min` are recommended, scores in `[caution_min,
/// recommended_min)` are caution, everything below is not recommended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub recommended_min: f64,
    pub caution_min: f64,
}

/// Rubric configuration consumed by the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub weights: FactorWeights,
    pub thresholds: TierThresholds,
    #[serde(default = "default_attention_threshold")]
    pub attention_threshold: f64,
}

fn default_attention_threshold() -> f64 {
    DEFAULT_ATTENTION_THRESHOLD
}

impl RankingConfig {
    pub fn new(weights: FactorWeights, thresholds: TierThresholds) -> Self {
        Self {
            weights,
            thresholds,
            attention_threshold: DEFAULT_ATTENTION_THRESHOLD,
        }
    }

    /// Reject configurations with an undefined composite score or an empty
    /// caution band. Surfaced immediately; a failure here is a caller bug.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for kind in FactorKind::ALL {
            let weight = self.weights.get(kind);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    factor: kind,
                    weight,
                });
            }
        }
        if self.weights.sum() <= 0.0 {
            return Err(ConfigurationError::ZeroWeightSum);
        }

        let TierThresholds {
            recommended_min,
            caution_min,
        } = self.thresholds;
        for (name, value) in [
            ("recommended_min", recommended_min),
            ("caution_min", caution_min),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigurationError::ThresholdOutOfRange { name, value });
            }
        }
        if recommended_min <= caution_min {
            return Err(ConfigurationError::ThresholdOrder {
                recommended_min,
                caution_min,
            });
        }

        if !self.attention_threshold.is_finite()
            || !(0.0..=100.0).contains(&self.attention_threshold)
        {
            return Err(ConfigurationError::AttentionThresholdOutOfRange(
                self.attention_threshold,
            ));
        }

        Ok(())
    }
}

/// Invalid rubric configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("weight for {factor} must be a finite non-negative number, got {weight}")]
    InvalidWeight { factor: FactorKind, weight: f64 },
    #[error("at least one factor weight must be positive")]
    ZeroWeightSum,
    #[error("tier threshold {name} must lie in [0, 100], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("recommended_min ({recommended_min}) must exceed caution_min ({caution_min})")]
    ThresholdOrder {
        recommended_min: f64,
        caution_min: f64,
    },
    #[error("attention threshold must lie in [0, 100], got {0}")]
    AttentionThresholdOutOfRange(f64),
}
