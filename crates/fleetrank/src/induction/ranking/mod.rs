//! Ranking & eligibility engine.
//!
//! A stateless, side-effect-free transform from validated fleet snapshots
//! to a sorted, tiered, explained induction board. Identical inputs produce
//! identical output, a property the history store and every test rely on.

mod config;
mod score;
mod validate;

pub use config::{
    ConfigurationError, FactorWeights, RankingConfig, TierThresholds,
    DEFAULT_ATTENTION_THRESHOLD,
};
pub use validate::ValidationError;

use super::domain::{RankedTrainset, TrainsetSnapshot};

/// Stateless engine applying one rubric configuration to fleet snapshots.
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    /// Build an engine, rejecting invalid rubric configuration up front.
    pub fn new(config: RankingConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank a fleet: validate, score, apply blocker overrides, tier, and
    /// sort descending by composite with ascending-id tie-break. Ranks are
    /// dense 1-based ordinals over the sorted board.
    pub fn rank(
        &self,
        fleet: &[TrainsetSnapshot],
    ) -> Result<Vec<RankedTrainset>, ValidationError> {
        validate::validate_fleet(fleet)?;

        let mut board: Vec<RankedTrainset> = fleet
            .iter()
            .map(|snapshot| {
                let composite = score::composite_score(snapshot, &self.config);
                let tier = score::tier_for(
                    composite,
                    !snapshot.blockers.is_empty(),
                    &self.config.thresholds,
                );
                RankedTrainset {
                    id: snapshot.id.clone(),
                    composite_score: composite,
                    tier,
                    rank: 0,
                    reasoning: score::reasoning(snapshot, &self.config),
                }
            })
            .collect();

        board.sort_by(|a, b| {
            b.composite_score
                .total_cmp(&a.composite_score)
                .then_with(|| a.id.cmp(&b.id))
        });
        for (index, entry) in board.iter_mut().enumerate() {
            entry.rank = (index + 1) as u32;
        }

        Ok(board)
    }
}
