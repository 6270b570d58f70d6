use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{RankedTrainset, TrainsetId};

/// Persisted output of one successful fleet evaluation. `generated_at`
/// doubles as the staleness indicator when the board is served as the last
/// known-good ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSnapshot {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<RankedTrainset>,
}

/// Storage abstraction for past rankings so the service can keep serving
/// the last known-good board when a fresh evaluation fails.
pub trait RankingHistory: Send + Sync {
    fn append(&self, snapshot: RankingSnapshot) -> Result<(), HistoryError>;
    fn latest(&self) -> Result<Option<RankingSnapshot>, HistoryError>;
}

/// Error enumeration for history-store failures.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("ranking history unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook fired when blockers withhold a trainset from service, so
/// the maintenance-alerting surface can react.
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: WithholdAlert) -> Result<(), AlertError>;
}

/// Alert payload naming the withheld trainset and its blocker tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdAlert {
    pub trainset_id: TrainsetId,
    pub blockers: Vec<String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
