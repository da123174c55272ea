//! Tooling primitives for deterministic GOAP agents.
//!
//! Engine-agnostic and dependency-light: agents push [`TraceEvent`]s into a [`Tracer`], which
//! fans them out to an in-memory [`TraceLog`] and/or a streaming [`TraceSink`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, TraceEvent, TraceLog, TraceSink, Tracer, VecTraceSink};
