use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{Tier, TrainsetSnapshot};
use super::ranking::{
    ConfigurationError, FactorWeights, RankingConfig, RankingEngine, TierThresholds,
    ValidationError,
};
use super::repository::{
    AlertError, AlertPublisher, HistoryError, RankingHistory, RankingSnapshot, WithholdAlert,
};

/// Per-request overrides of the service's default rubric. Overrides are
/// validated exactly like construction inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankOverrides {
    pub weights: Option<FactorWeights>,
    pub thresholds: Option<TierThresholds>,
}

/// Service composing the ranking engine, the history store, and the
/// withhold alert hook.
pub struct InductionPlanningService<R, A> {
    defaults: RankingConfig,
    history: Arc<R>,
    alerts: Arc<A>,
}

impl<R, A> InductionPlanningService<R, A>
where
    R: RankingHistory + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(
        history: Arc<R>,
        alerts: Arc<A>,
        defaults: RankingConfig,
    ) -> Result<Self, ConfigurationError> {
        defaults.validate()?;
        Ok(Self {
            defaults,
            history,
            alerts,
        })
    }

    pub fn defaults(&self) -> &RankingConfig {
        &self.defaults
    }

    /// Evaluate a fleet, persist the snapshot, and fire a withhold alert
    /// for every blocked trainset. A failed evaluation stores nothing, so
    /// the last known-good board stays intact.
    pub fn evaluate(
        &self,
        fleet: &[TrainsetSnapshot],
        overrides: RankOverrides,
    ) -> Result<RankingSnapshot, InductionServiceError> {
        let engine = RankingEngine::new(self.config_with(overrides))?;
        let results = engine.rank(fleet)?;

        let snapshot = RankingSnapshot {
            generated_at: Utc::now(),
            results,
        };
        self.history.append(snapshot.clone())?;

        for trainset in fleet {
            if !trainset.blockers.is_empty() {
                self.alerts.publish(WithholdAlert {
                    trainset_id: trainset.id.clone(),
                    blockers: trainset.blockers.clone(),
                })?;
            }
        }

        let withheld = snapshot
            .results
            .iter()
            .filter(|entry| entry.tier == Tier::NotRecommended)
            .count();
        info!(fleet_size = fleet.len(), withheld, "fleet evaluation stored");

        Ok(snapshot)
    }

    /// Last known-good board, or `None` before the first successful run.
    pub fn latest(&self) -> Result<Option<RankingSnapshot>, InductionServiceError> {
        Ok(self.history.latest()?)
    }

    fn config_with(&self, overrides: RankOverrides) -> RankingConfig {
        let mut config = self.defaults.clone();
        if let Some(weights) = overrides.weights {
            config.weights = weights;
        }
        if let Some(thresholds) = overrides.thresholds {
            config.thresholds = thresholds;
        }
        config
    }
}

/// Error raised by the induction planning service.
#[derive(Debug, thiserror::Error)]
pub enum InductionServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
