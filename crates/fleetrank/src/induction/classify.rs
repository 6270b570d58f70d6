use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity assigned to a raw depot fact. Blockers deny induction outright;
/// conflicts only surface in reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactSeverity {
    Blocker,
    Conflict,
}

/// Policy entry mapping one fact kind to its severity and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactPolicy {
    pub severity: FactSeverity,
    pub label: String,
}

impl FactPolicy {
    pub fn blocker(label: impl Into<String>) -> Self {
        Self {
            severity: FactSeverity::Blocker,
            label: label.into(),
        }
    }

    pub fn conflict(label: impl Into<String>) -> Self {
        Self {
            severity: FactSeverity::Conflict,
            label: label.into(),
        }
    }
}

/// A fact kind absent from the classification table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("no classification policy for fact kind '{kind}'")]
    UnknownFact { kind: String },
}

/// Classified label sets in the shape the ranking engine consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedFacts {
    pub blockers: Vec<String>,
    pub conflicts: Vec<String>,
}

/// Caller-supplied classification table (fact kind -> policy). This mapping
/// is policy, not algorithm: the engine stays agnostic to depot semantics
/// and only ever sees the resulting label sets, which keeps the same engine
/// reusable across trainsets, certificates, and cleaning tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactClassifier {
    policies: BTreeMap<String, FactPolicy>,
}

impl FactClassifier {
    pub fn new(policies: BTreeMap<String, FactPolicy>) -> Self {
        Self { policies }
    }

    pub fn policy(&self, kind: &str) -> Option<&FactPolicy> {
        self.policies.get(kind)
    }

    /// Split raw fact kinds into blocker and conflict labels. Blank entries
    /// are skipped; an unknown kind fails the whole batch rather than
    /// passing through unclassified.
    pub fn classify<I, S>(&self, facts: I) -> Result<ClassifiedFacts, ClassificationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classified = ClassifiedFacts::default();
        for fact in facts {
            let kind = fact.as_ref().trim();
            if kind.is_empty() {
                continue;
            }
            let policy =
                self.policies
                    .get(kind)
                    .ok_or_else(|| ClassificationError::UnknownFact {
                        kind: kind.to_string(),
                    })?;
            match policy.severity {
                FactSeverity::Blocker => classified.blockers.push(policy.label.clone()),
                FactSeverity::Conflict => classified.conflicts.push(policy.label.clone()),
            }
        }
        Ok(classified)
    }
}

impl FromIterator<(String, FactPolicy)> for FactClassifier {
    fn from_iter<T: IntoIterator<Item = (String, FactPolicy)>>(iter: T) -> Self {
        Self {
            policies: iter.into_iter().collect(),
        }
    }
}
