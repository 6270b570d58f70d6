use super::super::domain::{FactorKind, Tier, TrainsetSnapshot};
use super::config::{RankingConfig, TierThresholds};

/// Weighted mean over the six factors. A weighted mean (rather than a
/// product) degrades the composite proportionally when a single factor is
/// poor, matching the additive breakdowns shown on the consuming boards.
pub(crate) fn composite_score(snapshot: &TrainsetSnapshot, config: &RankingConfig) -> f64 {
    let mut weighted = 0.0;
    let mut applied = 0.0;
    for kind in FactorKind::ALL {
        let weight = config.weights.get(kind);
        // presence and range are validated before scoring
        let value = snapshot.factors.get(&kind).copied().unwrap_or_default();
        weighted += weight * value;
        applied += weight;
    }
    weighted / applied
}

/// Tier for an already-computed composite. Non-empty blockers force the
/// lowest tier; a blocker is a safety/compliance override and must never be
/// masked by strong scores on unrelated factors.
pub(crate) fn tier_for(composite: f64, blocked: bool, thresholds: &TierThresholds) -> Tier {
    if blocked {
        return Tier::NotRecommended;
    }
    if composite >= thresholds.recommended_min {
        Tier::Recommended
    } else if composite >= thresholds.caution_min {
        Tier::Caution
    } else {
        Tier::NotRecommended
    }
}

/// Ordered reasoning entries: blocker tags lead, then the two strongest
/// weighted contributions, then the weakest raw factor when it falls below
/// the attention threshold, then conflicts verbatim.
pub(crate) fn reasoning(snapshot: &TrainsetSnapshot, config: &RankingConfig) -> Vec<String> {
    let mut reasons: Vec<String> = snapshot.blockers.clone();

    let mut contributions: Vec<(FactorKind, f64, f64)> = FactorKind::ALL
        .iter()
        .map(|&kind| {
            let value = snapshot.factors.get(&kind).copied().unwrap_or_default();
            (kind, value, config.weights.get(kind) * value)
        })
        .collect();
    contributions.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

    let mut highlighted = Vec::new();
    for &(kind, value, contribution) in contributions.iter().take(2) {
        if contribution > 0.0 {
            reasons.push(render_factor(kind, value));
            highlighted.push(kind);
        }
    }

    if let Some(&(kind, value, _)) = contributions
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
    {
        if value < config.attention_threshold && !highlighted.contains(&kind) {
            reasons.push(render_factor(kind, value));
        }
    }

    reasons.extend(snapshot.conflicts.iter().cloned());
    reasons
}

fn render_factor(kind: FactorKind, value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{} at {:.0}%", kind.label(), value)
    } else {
        format!("{} at {:.1}%", kind.label(), value)
    }
}
