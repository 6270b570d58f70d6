use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::induction::classify::{FactClassifier, FactPolicy};
use crate::induction::domain::{FactorKind, TrainsetId, TrainsetSnapshot};
use crate::induction::ranking::{FactorWeights, RankingConfig, RankingEngine, TierThresholds};
use crate::induction::repository::{
    AlertError, AlertPublisher, HistoryError, RankingHistory, RankingSnapshot, WithholdAlert,
};
use crate::induction::service::InductionPlanningService;

pub(super) fn ranking_config() -> RankingConfig {
    RankingConfig::new(
        FactorWeights::uniform(),
        TierThresholds {
            recommended_min: 85.0,
            caution_min: 65.0,
        },
    )
}

pub(super) fn ranking_engine() -> RankingEngine {
    RankingEngine::new(ranking_config()).expect("config is valid")
}

/// Values follow `FactorKind::ALL` order: availability, maintenance,
/// fitness, branding, cleaning, priority.
pub(super) fn snapshot(id: &str, values: [f64; 6]) -> TrainsetSnapshot {
    let mut factors = BTreeMap::new();
    for (kind, value) in FactorKind::ALL.into_iter().zip(values) {
        factors.insert(kind, value);
    }
    TrainsetSnapshot {
        id: TrainsetId(id.to_string()),
        factors,
        blockers: Vec::new(),
        conflicts: Vec::new(),
    }
}

pub(super) fn healthy_fleet() -> Vec<TrainsetSnapshot> {
    vec![
        snapshot("TS-01", [98.0, 95.0, 100.0, 90.0, 100.0, 95.0]),
        snapshot("TS-02", [70.0, 72.0, 80.0, 66.0, 68.0, 75.0]),
        snapshot("TS-03", [40.0, 35.0, 55.0, 45.0, 50.0, 42.0]),
    ]
}

pub(super) fn blocked_snapshot(id: &str) -> TrainsetSnapshot {
    let mut snapshot = snapshot(id, [70.0, 30.0, 60.0, 40.0, 35.0, 45.0]);
    snapshot.blockers = vec!["fitness certificate expiring".to_string()];
    snapshot
}

pub(super) fn depot_classifier() -> FactClassifier {
    [
        (
            "fitness_expired".to_string(),
            FactPolicy::blocker("fitness certificate expired"),
        ),
        (
            "emergency_job_card".to_string(),
            FactPolicy::blocker("emergency job card open"),
        ),
        (
            "cleaning_overdue".to_string(),
            FactPolicy::conflict("cleaning overdue"),
        ),
        (
            "branding_shortfall".to_string(),
            FactPolicy::conflict("branding exposure below commitment"),
        ),
    ]
    .into_iter()
    .collect()
}

pub(super) fn build_service() -> (
    InductionPlanningService<MemoryHistory, MemoryAlerts>,
    Arc<MemoryHistory>,
    Arc<MemoryAlerts>,
) {
    let history = Arc::new(MemoryHistory::default());
    let alerts = Arc::new(MemoryAlerts::default());
    let service =
        InductionPlanningService::new(history.clone(), alerts.clone(), ranking_config())
            .expect("defaults are valid");
    (service, history, alerts)
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    snapshots: Mutex<Vec<RankingSnapshot>>,
}

impl MemoryHistory {
    pub(super) fn len(&self) -> usize {
        self.snapshots.lock().expect("history mutex poisoned").len()
    }
}

impl RankingHistory for MemoryHistory {
    fn append(&self, snapshot: RankingSnapshot) -> Result<(), HistoryError> {
        self.snapshots
            .lock()
            .expect("history mutex poisoned")
            .push(snapshot);
        Ok(())
    }

    fn latest(&self) -> Result<Option<RankingSnapshot>, HistoryError> {
        let guard = self.snapshots.lock().expect("history mutex poisoned");
        Ok(guard.last().cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryAlerts {
    events: Mutex<Vec<WithholdAlert>>,
}

impl MemoryAlerts {
    pub(super) fn events(&self) -> Vec<WithholdAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for MemoryAlerts {
    fn publish(&self, alert: WithholdAlert) -> Result<(), AlertError> {
        self.events
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

pub(super) struct UnavailableHistory;

impl RankingHistory for UnavailableHistory {
    fn append(&self, _snapshot: RankingSnapshot) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("store offline".to_string()))
    }

    fn latest(&self) -> Result<Option<RankingSnapshot>, HistoryError> {
        Err(HistoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
