use crate::infra::{
    default_ranking_config, depot_fact_classifier, InMemoryRankingHistory,
    InMemoryWithholdAlerts,
};
use clap::Args;
use fleetrank::error::AppError;
use fleetrank::induction::{
    FactorKind, FleetCsvImporter, InductionPlanningService, RankOverrides, RankingSnapshot,
    Tier, TrainsetId, TrainsetSnapshot,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Depot fleet-status CSV export to rank
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print reasoning for every trainset, not only the withheld ones
    #[arg(long)]
    pub(crate) verbose: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let classifier = depot_fact_classifier();
    let fleet = FleetCsvImporter::from_path(&args.csv, &classifier)?;

    let snapshot = evaluate(&fleet)?;
    println!("Induction board for {}", args.csv.display());
    render_board(&snapshot, true);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Induction ranking demo");

    let fleet = sample_fleet();
    let snapshot = evaluate(&fleet)?;
    render_board(&snapshot, args.verbose);

    Ok(())
}

fn evaluate(fleet: &[TrainsetSnapshot]) -> Result<RankingSnapshot, AppError> {
    let history = Arc::new(InMemoryRankingHistory::with_limit(1));
    let alerts = Arc::new(InMemoryWithholdAlerts::default());
    let service =
        InductionPlanningService::new(history, alerts.clone(), default_ranking_config())?;

    let snapshot = service.evaluate(fleet, RankOverrides::default())?;

    let events = alerts.events();
    if !events.is_empty() {
        println!("Withhold alerts:");
        for event in events {
            println!("  {}: {}", event.trainset_id, event.blockers.join("; "));
        }
    }

    Ok(snapshot)
}

fn render_board(snapshot: &RankingSnapshot, verbose: bool) {
    println!(
        "Generated at {}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{:<5} {:<8} {:>7}  {:<16}", "Rank", "Trainset", "Score", "Tier");
    for entry in &snapshot.results {
        println!(
            "{:<5} {:<8} {:>7.2}  {:<16}",
            entry.rank,
            entry.id.0,
            entry.composite_score,
            entry.tier.label()
        );
        if verbose || entry.tier == Tier::NotRecommended {
            for reason in &entry.reasoning {
                println!("      - {reason}");
            }
        }
    }
}

fn sample_fleet() -> Vec<TrainsetSnapshot> {
    let mut fleet = vec![
        trainset("KM-01", [98.0, 95.0, 100.0, 90.0, 100.0, 95.0]),
        trainset("KM-02", [88.0, 82.0, 95.0, 70.0, 80.0, 85.0]),
        trainset("KM-03", [75.0, 70.0, 85.0, 92.0, 66.0, 72.0]),
        trainset("KM-04", [60.0, 55.0, 72.0, 40.0, 58.0, 50.0]),
    ];

    let mut withheld = trainset("KM-05", [70.0, 30.0, 60.0, 40.0, 35.0, 45.0]);
    withheld.blockers = vec!["emergency job card open".to_string()];
    withheld.conflicts = vec!["cleaning overdue".to_string()];
    fleet.push(withheld);

    fleet
}

fn trainset(id: &str, values: [f64; 6]) -> TrainsetSnapshot {
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
