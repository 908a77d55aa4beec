//! Scheduler tuning.

use colony_core::{AgentId, SimDuration};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between preemption checks while a task is active.
    pub preempt_interval_seconds: f32,

    /// Simulated seconds a failed task stays suppressed for the creature that failed it.
    pub failure_retention_seconds: u64,

    /// Run the decision steps every N ticks; the active act is ticked every tick.
    pub think_every_ticks: u32,

    pub think_offset_ticks: u32,

    /// Base length of an idle wander, jittered by ±0.25 s per creature.
    pub wander_seconds: f32,

    pub wander_radius: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            preempt_interval_seconds: default_preempt_interval(),
            failure_retention_seconds: default_failure_retention(),
            think_every_ticks: 1,
            think_offset_ticks: 0,
            wander_seconds: default_wander_seconds(),
            wander_radius: default_wander_radius(),
        }
    }
}

fn default_preempt_interval() -> f32 {
    1.2
}
fn default_failure_retention() -> u64 {
    3_600
}
fn default_wander_seconds() -> f32 {
    1.5
}
fn default_wander_radius() -> f32 {
    5.0
}

impl SchedulerConfig {
    /// Spread thinking across creatures so they don't all decide on the same tick.
    pub fn staggered(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        Self {
            think_every_ticks: every,
            think_offset_ticks: (agent.stable_id() % u64::from(every)) as u32,
            ..Self::default()
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = u64::from(self.think_every_ticks.max(1));
        (tick + u64::from(self.think_offset_ticks)) % every == 0
    }

    pub fn failure_retention(&self) -> SimDuration {
        SimDuration::from_secs(self.failure_retention_seconds)
    }
}
