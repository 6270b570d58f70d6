use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::classify::{ClassificationError, FactClassifier};
use super::domain::{FactorKind, TrainsetId, TrainsetSnapshot};

#[derive(Debug)]
pub enum FleetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Classification(ClassificationError),
}

impl std::fmt::Display for FleetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetImportError::Io(err) => write!(f, "failed to read fleet export: {}", err),
            FleetImportError::Csv(err) => write!(f, "invalid fleet CSV data: {}", err),
            FleetImportError::Classification(err) => {
                write!(f, "could not classify depot facts: {}", err)
            }
        }
    }
}

impl std::error::Error for FleetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetImportError::Io(err) => Some(err),
            FleetImportError::Csv(err) => Some(err),
            FleetImportError::Classification(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FleetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FleetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ClassificationError> for FleetImportError {
    fn from(err: ClassificationError) -> Self {
        Self::Classification(err)
    }
}

/// Importer for depot fleet-status CSV exports. Each row carries the six
/// factor percentages plus a semicolon-separated `Facts` column that is run
/// through the caller's [`FactClassifier`]. Factor range checks stay with
/// the engine; the importer is transport only.
pub struct FleetCsvImporter;

impl FleetCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        classifier: &FactClassifier,
    ) -> Result<Vec<TrainsetSnapshot>, FleetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, classifier)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        classifier: &FactClassifier,
    ) -> Result<Vec<TrainsetSnapshot>, FleetImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut fleet = Vec::new();

        for record in csv_reader.deserialize::<FleetRow>() {
            let row = record?;
            fleet.push(row.into_snapshot(classifier)?);
        }

        Ok(fleet)
    }
}

#[derive(Debug, Deserialize)]
struct FleetRow {
    #[serde(rename = "Trainset ID")]
    trainset_id: String,
    #[serde(rename = "Availability")]
    availability: f64,
    #[serde(rename = "Maintenance")]
    maintenance: f64,
    #[serde(rename = "Fitness")]
    fitness: f64,
    #[serde(rename = "Branding")]
    branding: f64,
    #[serde(rename = "Cleaning")]
    cleaning: f64,
    #[serde(rename = "Priority")]
    priority: f64,
    #[serde(rename = "Facts", default)]
    facts: Option<String>,
}

impl FleetRow {
    fn into_snapshot(
        self,
        classifier: &FactClassifier,
    ) -> Result<TrainsetSnapshot, ClassificationError> {
        let facts = self
            .facts
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|kind| !kind.is_empty());
        let classified = classifier.classify(facts)?;

        let mut factors = BTreeMap::new();
        factors.insert(FactorKind::Availability, self.availability);
        factors.insert(FactorKind::Maintenance, self.maintenance);
        factors.insert(FactorKind::Fitness, self.fitness);
        factors.insert(FactorKind::Branding, self.branding);
        factors.insert(FactorKind::Cleaning, self.cleaning);
        factors.insert(FactorKind::Priority, self.priority);

        Ok(TrainsetSnapshot {
            id: TrainsetId(self.trainset_id),
            factors,
            blockers: classified.blockers,
            conflicts: classified.conflicts,
        })
    }
}
