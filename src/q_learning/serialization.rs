//! Serialization support for trained Q-tables.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::q_learning::{
    agent::{QLearningAgent, QLearningConfig},
    q_table::QTable,
};

/// How a saved table was produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Episodes played across all phases
    pub episodes: usize,
    /// Name of the training opponent
    pub opponent: String,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub config: QLearningConfig,
    pub metadata: TrainingMetadata,
    pub table: QTable,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn new(config: QLearningConfig, table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            config,
            metadata,
            table,
        }
    }

    pub fn from_agent(agent: &QLearningAgent, metadata: TrainingMetadata) -> Self {
        Self::new(*agent.config(), agent.table().clone(), metadata)
    }

    /// Rebuild an agent owning the saved table.
    pub fn into_agent(self) -> Result<QLearningAgent> {
        self.check_version()?;
        QLearningAgent::with_table(self.config, self.table)
            .context("Saved Q-learning configuration is invalid")
    }

    fn check_version(&self) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported Q-table save format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, self).context("Failed to serialize Q-table")?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        let saved: Self =
            rmp_serde::decode::from_read(reader).context("Failed to deserialize Q-table")?;
        saved.check_version()?;
        Ok(saved)
    }
}
