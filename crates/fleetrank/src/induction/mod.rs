//! Induction planning: depot fleet snapshots in, ranked induction board out.
//!
//! `ranking` carries the scoring engine proper; `classify` turns raw depot
//! facts into the blocker/conflict sets the engine consumes; `service`
//! composes the engine with history storage and withhold alerting; `router`
//! exposes the whole thing over HTTP.

pub mod classify;
pub mod domain;
pub mod import;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classify::{
    ClassificationError, ClassifiedFacts, FactClassifier, FactPolicy, FactSeverity,
};
pub use domain::{FactorKind, RankedTrainset, Tier, TrainsetId, TrainsetSnapshot};
pub use import::{FleetCsvImporter, FleetImportError};
pub use ranking::{
    ConfigurationError, FactorWeights, RankingConfig, RankingEngine, TierThresholds,
    ValidationError,
};
pub use repository::{
    AlertError, AlertPublisher, HistoryError, RankingHistory, RankingSnapshot, WithholdAlert,
};
pub use router::{induction_router, RankRequest};
pub use service::{InductionPlanningService, InductionServiceError, RankOverrides};
