//! Task assignment and behavior execution for colony creatures.
//!
//! Each [`Creature`] owns a [`TaskLedger`] (queued tasks, the active task and
//! its act, recent failures) and runs the per-tick decision procedure:
//! expire failures, purge bad tasks, preempt, pick work when idle, recover a
//! missing act, then tick the act and settle its outcome.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod creature;
pub mod describe;
pub mod error;
pub mod failures;
pub mod idle;
pub mod ledger;
pub mod world;

pub use config::SchedulerConfig;
pub use creature::{tick_creatures, Creature};
pub use describe::{Description, Diagnostics};
pub use error::{Result, SchedulerError};
pub use failures::{FailedTask, FailedTasks};
pub use idle::{DefaultIdle, IdleBehavior};
pub use ledger::{TaskLedger, NO_PATH};
pub use world::CreatureWorld;
