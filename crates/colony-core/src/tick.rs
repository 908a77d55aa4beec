use crate::{rng, AgentId, SimTime, SplitMix64};

/// Per-step input handed to every scheduling pass and every act tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Monotonic step counter.
    pub tick: u64,
    /// Seconds advanced by this step; drives throttling timers.
    pub dt_seconds: f32,
    /// Simulated calendar time at the start of this step.
    pub now: SimTime,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, now: SimTime, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            now,
            seed,
        }
    }

    /// The context for the step after this one, with the clock advanced by `dt_seconds`.
    pub fn next(&self) -> Self {
        Self {
            tick: self.tick + 1,
            dt_seconds: self.dt_seconds,
            now: self.now.after_seconds(self.dt_seconds),
            seed: self.seed,
        }
    }

    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream ^ self.tick);
        SplitMix64::new(seed)
    }
}
