//! Training-set assembly and export
//!
//! One sample per game with enough history on both sides: the winner's
//! window concatenated with the loser's window, labeled 1.0. Balancing
//! the single-class labels is the downstream trainer's problem.

use crate::data::GameStore;
use crate::features::window::history_window;
use crate::{NflError, Result};
use std::io::Write;
use std::path::Path;

/// Training-set parameters
#[derive(Debug, Clone, Copy)]
pub struct DatasetConfig {
    /// Games of prior history per team
    pub lookback: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig { lookback: 5 }
    }
}

/// Assembled feature matrix and labels for the external classifier
#[derive(Debug, Clone)]
pub struct TrainingSet {
    samples: Vec<Vec<f32>>,
    labels: Vec<f32>,
    lookback: usize,
    /// Games excluded because a side lacked `lookback` prior games
    pub skipped: usize,
}

impl TrainingSet {
    /// Walk every game date-ascending and build samples where both teams
    /// have a full history window before the game date.
    pub fn build(store: &GameStore, config: DatasetConfig) -> Result<Self> {
        let mut samples = Vec::new();
        let mut labels = Vec::new();
        let mut skipped = 0usize;

        log::info!(
            "Preparing features with lookback of {} games",
            config.lookback
        );

        for game in store.all_games() {
            let winner_window = history_window(store, &game.winner, game.date, config.lookback);
            let loser_window = history_window(store, &game.loser, game.date, config.lookback);

            match (winner_window, loser_window) {
                (Some(mut features), Some(loser_features)) => {
                    features.extend(loser_features);
                    samples.push(features);
                    labels.push(1.0);
                }
                _ => {
                    log::debug!(
                        "Skipping {} vs {} on {}: insufficient history",
                        game.winner,
                        game.loser,
                        game.date
                    );
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Feature preparation complete: {} samples, {} skipped",
            samples.len(),
            skipped
        );

        if samples.is_empty() {
            return Err(NflError::NoSamples(config.lookback));
        }

        Ok(TrainingSet {
            samples,
            labels,
            lookback: config.lookback,
            skipped,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Width of each sample: one window per side
    pub fn feature_dim(&self) -> usize {
        self.lookback * 2
    }

    pub fn samples(&self) -> &[Vec<f32>] {
        &self.samples
    }

    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    /// Write the matrix plus a label column as CSV, the handoff format
    /// for the trainable classifier.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header: Vec<String> = (0..self.feature_dim()).map(|i| format!("f{}", i)).collect();
        header.push("label".to_string());
        wtr.write_record(&header)?;

        for (sample, label) in self.samples.iter().zip(self.labels.iter()) {
            let mut row: Vec<String> = sample.iter().map(|v| format!("{}", v)).collect();
            row.push(format!("{}", label));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_csv(file)?;
        log::info!("Exported {} samples to {}", self.len(), path.display());
        Ok(())
    }
}
