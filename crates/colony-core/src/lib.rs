//! Deterministic, engine-agnostic primitives for the colony simulation.
//!
//! Everything here is single-threaded and allocation-light: agent ids, the
//! world access traits, the simulated clock, timers, a typed blackboard and a
//! small seeded RNG.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod clock;
pub mod rng;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, Blackboard};
pub use clock::{SimDuration, SimTime, Timer};
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
