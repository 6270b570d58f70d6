use std::collections::BTreeSet;

use super::super::domain::{FactorKind, TrainsetId, TrainsetSnapshot};

/// Malformed ranking input. The engine fails fast on the first offending
/// snapshot and never clamps or substitutes defaults, since either would
/// hide upstream data-quality bugs feeding an operational decision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("fleet submitted for ranking is empty")]
    EmptyFleet,
    #[error("duplicate trainset id {id}")]
    DuplicateTrainset { id: TrainsetId },
    #[error("trainset {id} is missing the {factor} factor")]
    MissingFactor { id: TrainsetId, factor: FactorKind },
    #[error("trainset {id} factor {factor} must lie in [0, 100], got {value}")]
    FactorOutOfRange {
        id: TrainsetId,
        factor: FactorKind,
        value: f64,
    },
}

pub(crate) fn validate_fleet(fleet: &[TrainsetSnapshot]) -> Result<(), ValidationError> {
    if fleet.is_empty() {
        return Err(ValidationError::EmptyFleet);
    }

    let mut seen: BTreeSet<&TrainsetId> = BTreeSet::new();
    for snapshot in fleet {
        if !seen.insert(&snapshot.id) {
            return Err(ValidationError::DuplicateTrainset {
                id: snapshot.id.clone(),
            });
        }

        for kind in FactorKind::ALL {
            match snapshot.factors.get(&kind) {
                None => {
                    return Err(ValidationError::MissingFactor {
                        id: snapshot.id.clone(),
                        factor: kind,
                    })
                }
                Some(value) if !value.is_finite() || !(0.0..=100.0).contains(value) => {
                    return Err(ValidationError::FactorOutOfRange {
                        id: snapshot.id.clone(),
                        factor: kind,
                        value: *value,
                    })
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
