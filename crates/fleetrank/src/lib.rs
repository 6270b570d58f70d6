//! Trainset induction ranking for metro fleet operations.
//!
//! The heart of the crate is [`induction::RankingEngine`], a pure function
//! from depot fleet snapshots to a deterministic, tiered induction board.
//! Around it sit the fact classifier, the CSV importer for depot exports,
//! and the service facade plus HTTP router consumed by `services/api`.

pub mod config;
pub mod error;
pub mod induction;
pub mod telemetry;
