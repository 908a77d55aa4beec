//! Cooperative behavior-tree runtime for colony creatures.
//!
//! An [`Act`] is a resumable node: every `tick` does a bounded amount of work
//! and reports [`ActStatus`]. Waiting on the world is expressed as returning
//! `Running` on successive ticks; nothing here blocks or sleeps.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod act;
pub mod composite;
pub mod leaf;

pub use act::{describe_chain, Act, ActStatus};
pub use composite::{Domain, Select, Sequence};
pub use leaf::{Condition, Do, Wait, Wrap};
