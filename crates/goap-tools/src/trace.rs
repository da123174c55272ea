#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A small, allocation-friendly trace event.
///
/// "Dumb data" recorded during simulation and rendered later by tooling. `a` and `b` are
/// tag-specific payloads (an action index, a plan length, a goal id, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.iter().filter(|e| e.tag == tag).count()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }
}

/// Per-agent trace fan-out. Both outputs are optional; with neither, `emit` is a no-op.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting events in memory.
    pub fn with_log(mut self) -> Self {
        self.log = Some(TraceLog::default());
        self
    }

    /// Stream events into `sink`.
    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some() || self.sink.is_some()
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.as_mut().map(std::mem::take)
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.push(event.clone());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("log", &self.log.as_ref().map(|l| l.events.len()))
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
