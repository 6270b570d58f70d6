use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for trainsets under evaluation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrainsetId(pub String);

impl fmt::Display for TrainsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of factors feeding the induction rubric. Every snapshot
/// must carry a value for each of them; the engine rejects partial data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Availability,
    Maintenance,
    Fitness,
    Branding,
    Cleaning,
    Priority,
}

impl FactorKind {
    pub const ALL: [FactorKind; 6] = [
        FactorKind::Availability,
        FactorKind::Maintenance,
        FactorKind::Fitness,
        FactorKind::Branding,
        FactorKind::Cleaning,
        FactorKind::Priority,
    ];

    /// Wire/config name, matching the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            FactorKind::Availability => "availability",
            FactorKind::Maintenance => "maintenance",
            FactorKind::Fitness => "fitness",
            FactorKind::Branding => "branding",
            FactorKind::Cleaning => "cleaning",
            FactorKind::Priority => "priority",
        }
    }

    /// Display label used in reasoning strings.
    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Availability => "Availability",
            FactorKind::Maintenance => "Maintenance health",
            FactorKind::Fitness => "Fitness certificates",
            FactorKind::Branding => "Branding commitment",
            FactorKind::Cleaning => "Cleaning status",
            FactorKind::Priority => "Operational priority",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Depot snapshot of one trainset as submitted for ranking. Factor values
/// are normalized percentages in [0, 100]; blockers and conflicts arrive
/// pre-classified (see [`super::classify`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainsetSnapshot {
    pub id: TrainsetId,
    pub factors: BTreeMap<FactorKind, f64>,
    #[serde(default)]
    pub blockers: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

/// Induction tier derived from the composite score and blocker overrides.
/// Wire tokens are kebab-case (`recommended`, `caution`, `not-recommended`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    Recommended,
    Caution,
    NotRecommended,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Recommended => "recommended",
            Tier::Caution => "caution",
            Tier::NotRecommended => "not recommended",
        }
    }
}

/// One entry of the ranked induction board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTrainset {
    pub id: TrainsetId,
    pub composite_score: f64,
    pub tier: Tier,
    pub rank: u32,
    pub reasoning: Vec<String>,
}
