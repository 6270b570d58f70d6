use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use fleetrank::induction::{
    AlertError, AlertPublisher, FactClassifier, FactPolicy, FactorWeights, HistoryError,
    RankingConfig, RankingHistory, RankingSnapshot, TierThresholds, WithholdAlert,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Bounded in-memory ranking history; the oldest snapshot falls off once
/// the retention cap is reached.
pub(crate) struct InMemoryRankingHistory {
    snapshots: Mutex<VecDeque<RankingSnapshot>>,
    limit: usize,
}

impl InMemoryRankingHistory {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: Mutex::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }
}

impl RankingHistory for InMemoryRankingHistory {
    fn append(&self, snapshot: RankingSnapshot) -> Result<(), HistoryError> {
        let mut guard = self.snapshots.lock().expect("history mutex poisoned");
        if guard.len() == self.limit {
            guard.pop_front();
        }
        guard.push_back(snapshot);
        Ok(())
    }

    fn latest(&self) -> Result<Option<RankingSnapshot>, HistoryError> {
        let guard = self.snapshots.lock().expect("history mutex poisoned");
        Ok(guard.back().cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryWithholdAlerts {
    events: Mutex<Vec<WithholdAlert>>,
}

impl AlertPublisher for InMemoryWithholdAlerts {
    fn publish(&self, alert: WithholdAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

impl InMemoryWithholdAlerts {
    pub(crate) fn events(&self) -> Vec<WithholdAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

/// Operational rubric: availability and the safety-adjacent factors carry
/// the most weight; branding and cleaning matter but rarely decide.
pub(crate) fn default_ranking_config() -> RankingConfig {
    RankingConfig::new(
        FactorWeights {
            availability: 25.0,
            maintenance: 20.0,
            fitness: 20.0,
            branding: 10.0,
            cleaning: 10.0,
            priority: 15.0,
        },
        TierThresholds {
            recommended_min: 85.0,
            caution_min: 65.0,
        },
    )
}

/// Classification table for the fact kinds emitted by the depot systems.
pub(crate) fn depot_fact_classifier() -> FactClassifier {
    [
        (
            "fitness_expired".to_string(),
            FactPolicy::blocker("fitness certificate expired"),
        ),
        (
            "fitness_expiring".to_string(),
            FactPolicy::blocker("fitness certificate expiring"),
        ),
        (
            "emergency_job_card".to_string(),
            FactPolicy::blocker("emergency job card open"),
        ),
        (
            "mileage_exceeded".to_string(),
            FactPolicy::blocker("mileage threshold exceeded"),
        ),
        (
            "cleaning_overdue".to_string(),
            FactPolicy::conflict("cleaning overdue"),
        ),
        (
            "branding_shortfall".to_string(),
            FactPolicy::conflict("branding exposure below commitment"),
        ),
        (
            "open_job_cards".to_string(),
            FactPolicy::conflict("non-critical job cards open"),
        ),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    use fleetrank::induction::{
        FactorKind, InductionPlanningService, RankOverrides, TrainsetId, TrainsetSnapshot,
    };

    fn trainset(id: &str) -> TrainsetSnapshot {
        let mut factors = BTreeMap::new();
        for kind in FactorKind::ALL {
            factors.insert(kind, 80.0);
        }
        TrainsetSnapshot {
            id: TrainsetId(id.to_string()),
            factors,
            blockers: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    fn fleet_of(ids: &[&str]) -> Vec<TrainsetSnapshot> {
        ids.iter().map(|id| trainset(id)).collect()
    }

    #[test]
    fn history_evicts_the_oldest_snapshot_at_the_cap() {
        let history = Arc::new(InMemoryRankingHistory::with_limit(2));
        let alerts = Arc::new(InMemoryWithholdAlerts::default());
        let service = InductionPlanningService::new(
            history.clone(),
            alerts,
            default_ranking_config(),
        )
        .expect("defaults are valid");

        service
            .evaluate(&fleet_of(&["KM-01"]), RankOverrides::default())
            .expect("first run");
        service
            .evaluate(&fleet_of(&["KM-01", "KM-02"]), RankOverrides::default())
            .expect("second run");
        service
            .evaluate(
                &fleet_of(&["KM-01", "KM-02", "KM-03"]),
                RankOverrides::default(),
            )
            .expect("third run");

        let guard = history.snapshots.lock().expect("history mutex poisoned");
        assert_eq!(guard.len(), 2);
        assert_eq!(guard.front().map(|s| s.results.len()), Some(2));
        assert_eq!(guard.back().map(|s| s.results.len()), Some(3));
    }

    #[test]
    fn latest_serves_the_newest_retained_snapshot() {
        let history = Arc::new(InMemoryRankingHistory::with_limit(1));
        let service = InductionPlanningService::new(
            history.clone(),
            Arc::new(InMemoryWithholdAlerts::default()),
            default_ranking_config(),
        )
        .expect("defaults are valid");

        assert!(history.latest().expect("store reachable").is_none());

        let snapshot = service
            .evaluate(&fleet_of(&["KM-09"]), RankOverrides::default())
            .expect("evaluation succeeds");

        let latest = service
            .latest()
            .expect("store reachable")
            .expect("snapshot retained");
        assert_eq!(latest, snapshot);
    }
}
