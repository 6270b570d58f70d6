use super::common::*;
use crate::induction::domain::{FactorKind, Tier};
use crate::induction::ranking::{
    ConfigurationError, FactorWeights, RankingConfig, RankingEngine, TierThresholds,
    ValidationError,
};

#[test]
fn single_strong_trainset_is_recommended() {
    let engine = ranking_engine();
    let fleet = vec![snapshot("T1", [98.0, 95.0, 100.0, 90.0, 100.0, 95.0])];

    let board = engine.rank(&fleet).expect("fleet ranks");

    assert_eq!(board.len(), 1);
    let entry = &board[0];
    assert_eq!(entry.id.0, "T1");
    assert!((entry.composite_score - 578.0 / 6.0).abs() < 1e-9);
    assert!((entry.composite_score - 96.33).abs() < 0.01);
    assert_eq!(entry.tier, Tier::Recommended);
    assert_eq!(entry.rank, 1);
}

#[test]
fn blockers_force_lowest_tier_and_lead_reasoning() {
    let engine = ranking_engine();
    let mut trainset = blocked_snapshot("T2");
    trainset.conflicts = vec!["cleaning overdue".to_string()];

    let board = engine.rank(&[trainset]).expect("fleet ranks");

    let entry = &board[0];
    // raw weighted mean 46.67 already lands in not-recommended; the
    // override must hold even when it would not
    assert!((entry.composite_score - 280.0 / 6.0).abs() < 1e-9);
    assert_eq!(entry.tier, Tier::NotRecommended);
    assert_eq!(entry.reasoning[0], "fitness certificate expiring");
    assert_eq!(
        entry.reasoning.last().map(String::as_str),
        Some("cleaning overdue")
    );
}

#[test]
fn high_score_never_masks_a_blocker() {
    let engine = ranking_engine();
    let mut trainset = snapshot("T9", [98.0, 95.0, 100.0, 90.0, 100.0, 95.0]);
    trainset.blockers = vec!["emergency job card open".to_string()];

    let board = engine.rank(&[trainset]).expect("fleet ranks");

    assert_eq!(board[0].tier, Tier::NotRecommended);
    assert!(board[0].composite_score > 85.0);
}

#[test]
fn ties_break_by_ascending_id() {
    let engine = ranking_engine();
    let fleet = vec![
        snapshot("T5", [80.0; 6]),
        snapshot("T3", [80.0; 6]),
    ];

    let board = engine.rank(&fleet).expect("fleet ranks");

    assert_eq!(board[0].id.0, "T3");
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].id.0, "T5");
    assert_eq!(board[1].rank, 2);
    assert_eq!(board[0].composite_score, board[1].composite_score);
}

#[test]
fn repeated_calls_produce_identical_boards() {
    let engine = ranking_engine();
    let mut fleet = healthy_fleet();
    fleet.push(blocked_snapshot("TS-04"));

    let first = engine.rank(&fleet).expect("first run");
    let second = engine.rank(&fleet).expect("second run");

    assert_eq!(first, second);
}

#[test]
fn composite_scores_stay_in_bounds_and_ranks_are_monotonic() {
    let engine = ranking_engine();
    let board = engine.rank(&healthy_fleet()).expect("fleet ranks");

    for window in board.windows(2) {
        assert!(window[0].composite_score >= window[1].composite_score);
        assert_eq!(window[0].rank + 1, window[1].rank);
    }
    for entry in &board {
        assert!((0.0..=100.0).contains(&entry.composite_score));
    }
}

#[test]
fn tiers_follow_thresholds_without_blockers() {
    let engine = ranking_engine();
    let board = engine.rank(&healthy_fleet()).expect("fleet ranks");

    let thresholds = engine.config().thresholds;
    for entry in &board {
        let expected = if entry.composite_score >= thresholds.recommended_min {
            Tier::Recommended
        } else if entry.composite_score >= thresholds.caution_min {
            Tier::Caution
        } else {
            Tier::NotRecommended
        };
        assert_eq!(entry.tier, expected, "trainset {}", entry.id);
    }
}

#[test]
fn weights_normalize_by_applied_sum() {
    let config = RankingConfig::new(
        FactorWeights {
            availability: 2.0,
            maintenance: 0.0,
            fitness: 0.0,
            branding: 0.0,
            cleaning: 0.0,
            priority: 2.0,
        },
        TierThresholds {
            recommended_min: 85.0,
            caution_min: 65.0,
        },
    );
    let engine = RankingEngine::new(config).expect("config is valid");
    let fleet = vec![snapshot("T1", [90.0, 10.0, 10.0, 10.0, 10.0, 70.0])];

    let board = engine.rank(&fleet).expect("fleet ranks");

    // only availability and priority carry weight: (2*90 + 2*70) / 4
    assert!((board[0].composite_score - 80.0).abs() < 1e-9);
}

#[test]
fn reasoning_names_top_contributors_and_weak_factor() {
    let engine = ranking_engine();
    let fleet = vec![snapshot("T7", [95.0, 40.0, 88.0, 70.0, 72.0, 75.0])];

    let board = engine.rank(&fleet).expect("fleet ranks");

    let reasoning = &board[0].reasoning;
    assert_eq!(reasoning[0], "Availability at 95%");
    assert_eq!(reasoning[1], "Fitness certificates at 88%");
    // maintenance sits below the attention threshold of 60
    assert_eq!(reasoning[2], "Maintenance health at 40%");
    assert_eq!(reasoning.len(), 3);
}

#[test]
fn reasoning_skips_attention_entry_when_all_factors_are_healthy() {
    let engine = ranking_engine();
    let fleet = vec![snapshot("T8", [95.0, 80.0, 88.0, 70.0, 72.0, 75.0])];

    let board = engine.rank(&fleet).expect("fleet ranks");

    assert_eq!(board[0].reasoning.len(), 2);
}

#[test]
fn rejects_factor_above_range() {
    let engine = ranking_engine();
    let fleet = vec![snapshot("T1", [101.0, 95.0, 100.0, 90.0, 100.0, 95.0])];

    let error = engine.rank(&fleet).expect_err("out of range rejected");

    match error {
        ValidationError::FactorOutOfRange { id, factor, value } => {
            assert_eq!(id.0, "T1");
            assert_eq!(factor, FactorKind::Availability);
            assert_eq!(value, 101.0);
        }
        other => panic!("expected FactorOutOfRange, got {other:?}"),
    }
}

#[test]
fn rejects_negative_factor() {
    let engine = ranking_engine();
    let fleet = vec![snapshot("T1", [98.0, -1.0, 100.0, 90.0, 100.0, 95.0])];

    let error = engine.rank(&fleet).expect_err("negative rejected");
    assert!(matches!(
        error,
        ValidationError::FactorOutOfRange {
            factor: FactorKind::Maintenance,
            ..
        }
    ));
}

#[test]
fn rejects_missing_factor() {
    let engine = ranking_engine();
    let mut trainset = snapshot("T1", [98.0, 95.0, 100.0, 90.0, 100.0, 95.0]);
    trainset.factors.remove(&FactorKind::Cleaning);

    let error = engine.rank(&[trainset]).expect_err("missing rejected");

    match error {
        ValidationError::MissingFactor { id, factor } => {
            assert_eq!(id.0, "T1");
            assert_eq!(factor, FactorKind::Cleaning);
        }
        other => panic!("expected MissingFactor, got {other:?}"),
    }
}

#[test]
fn rejects_duplicate_ids_and_empty_fleet() {
    let engine = ranking_engine();

    let fleet = vec![snapshot("T1", [80.0; 6]), snapshot("T1", [70.0; 6])];
    assert!(matches!(
        engine.rank(&fleet),
        Err(ValidationError::DuplicateTrainset { .. })
    ));

    assert!(matches!(engine.rank(&[]), Err(ValidationError::EmptyFleet)));
}

#[test]
fn rejects_zero_weight_sum() {
    let config = RankingConfig::new(
        FactorWeights {
            availability: 0.0,
            maintenance: 0.0,
            fitness: 0.0,
            branding: 0.0,
            cleaning: 0.0,
            priority: 0.0,
        },
        TierThresholds {
            recommended_min: 85.0,
            caution_min: 65.0,
        },
    );

    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::ZeroWeightSum)
    ));
}

#[test]
fn rejects_negative_weight() {
    let mut weights = FactorWeights::uniform();
    weights.branding = -0.5;
    let config = RankingConfig::new(
        weights,
        TierThresholds {
            recommended_min: 85.0,
            caution_min: 65.0,
        },
    );

    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::InvalidWeight {
            factor: FactorKind::Branding,
            ..
        })
    ));
}

#[test]
fn rejects_inverted_thresholds() {
    let config = RankingConfig::new(
        FactorWeights::uniform(),
        TierThresholds {
            recommended_min: 60.0,
            caution_min: 70.0,
        },
    );

    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::ThresholdOrder { .. })
    ));
}

#[test]
fn rejects_thresholds_outside_percentage_range() {
    let config = RankingConfig::new(
        FactorWeights::uniform(),
        TierThresholds {
            recommended_min: 120.0,
            caution_min: 65.0,
        },
    );
    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::ThresholdOutOfRange {
            name: "recommended_min",
            ..
        })
    ));

    let config = RankingConfig::new(
        FactorWeights::uniform(),
        TierThresholds {
            recommended_min: 85.0,
            caution_min: -5.0,
        },
    );
    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::ThresholdOutOfRange {
            name: "caution_min",
            ..
        })
    ));
}

#[test]
fn rejects_attention_threshold_outside_percentage_range() {
    let mut config = ranking_config();
    config.attention_threshold = 150.0;

    assert!(matches!(
        RankingEngine::new(config),
        Err(ConfigurationError::AttentionThresholdOutOfRange(_))
    ));
}

#[test]
fn inputs_are_not_mutated() {
    let engine = ranking_engine();
    let fleet = healthy_fleet();
    let before = fleet.clone();

    engine.rank(&fleet).expect("fleet ranks");

    assert_eq!(fleet, before);
}
