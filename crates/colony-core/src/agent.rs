use core::fmt::Debug;

/// Stable identifier for a simulated creature.
///
/// Scheduling is deterministic, so ids must:
/// - order stably (`Ord`), which fixes the order creatures are ticked in
/// - expose a numeric id (`stable_id`) for RNG seeding and trace events
pub trait AgentId: Copy + Ord + Eq + Debug + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}
