use crate::AgentId;

/// Read-only world access.
///
/// The kernel does not prescribe which queries a world exposes. Higher crates
/// (tasks, scheduling) define extension traits for what they need.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
