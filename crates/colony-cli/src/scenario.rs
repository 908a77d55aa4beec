//! Scenario loading, from YAML like the rest of the workspace's config.

use std::path::Path;

use anyhow::{Context, Result};
use colony_agent::SchedulerConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,

    /// Ticks to simulate.
    pub ticks: u64,

    #[serde(default = "default_dt")]
    pub dt_seconds: f32,

    /// Print creature descriptions every N ticks (0 disables).
    pub report_every: u64,

    pub colonists: usize,

    /// Creatures outside the colony faction; they never take pooled work.
    pub wild_creatures: usize,

    pub trees: usize,

    pub food: u32,

    /// Potions handed to each colonist at the start.
    pub potions: u32,

    #[serde(default)]
    pub hunger: HungerConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Collect trace events on every creature's blackboard.
    pub trace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HungerConfig {
    pub per_second: f32,
    pub hungry_at: f32,
    pub starving_at: f32,
}

impl Default for HungerConfig {
    fn default() -> Self {
        Self {
            per_second: 0.01,
            hungry_at: 0.6,
            starving_at: 0.85,
        }
    }
}

fn default_dt() -> f32 {
    0.1
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 600,
            dt_seconds: default_dt(),
            report_every: 100,
            colonists: 3,
            wild_creatures: 1,
            trees: 6,
            food: 4,
            potions: 1,
            hunger: HungerConfig::default(),
            scheduler: SchedulerConfig::default(),
            trace: false,
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scenario from {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize scenario")
    }
}
