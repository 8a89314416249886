//! Decision tracing for the HBFS planner.
//!
//! The controller reports each phase change as a [`TraceEvent`] into a [`TraceSink`] it owns.
//! Tests usually hand it a [`SharedTraceLog`] and assert on the recorded tags (see [`tags`]);
//! [`LogTraceSink`] routes the same events into `tracing`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    tags, LogTraceSink, NullTraceSink, SharedTraceLog, TraceEvent, TraceLog, TraceSink,
};
