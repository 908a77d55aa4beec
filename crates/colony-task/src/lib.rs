//! Tasks: what a creature can be asked to do.
//!
//! A [`Task`] answers feasibility, cost, completion and retry questions for a
//! given creature and binds itself to an [`Act`](colony_act::Act) when
//! activated. Tasks are shared between creatures and the global pool through
//! [`TaskHandle`]; the pool ([`TaskPool`], [`TaskManager`]) is the only place
//! that sees claims across creatures.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod act_task;
pub mod error;
pub mod handle;
pub mod pool;
pub mod task;

pub use act_task::ActTask;
pub use error::{Result, TaskError};
pub use handle::{TaskHandle, INFEASIBLE_COST};
pub use pool::{TaskManager, TaskPool};
pub use task::{Feasibility, Task, TaskCategory, TaskInfo, TaskPriority, TaskWorld};
