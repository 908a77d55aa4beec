//! Tooling primitives for the colony scheduler.
//!
//! Trace events are plain data recorded onto a creature's blackboard while it
//! is scheduled, so tests and debug views can replay exactly which transitions
//! happened on which tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
