use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tags emitted by the planner controller. `a`/`b` meanings are listed per tag.
pub mod tags {
    /// Search initialized. `a`: episode, `b`: action count.
    pub const INIT: &str = "hbfs.init";
    /// Winning plan adopted. `a`: plan length, `b`: expansions.
    pub const SOLUTION: &str = "hbfs.solution";
    /// Tick ceiling reached, best frontier node adopted. `a`: plan length.
    pub const TIMEOUT: &str = "hbfs.timeout";
    /// Repeated frontier starvation, random action adopted. `a`: starvation events.
    pub const STARVED: &str = "hbfs.starved";
    /// Expansion found nothing to pop. `a`: episode.
    pub const FRONTIER_EMPTY: &str = "hbfs.frontier_empty";
    /// Search and plan released. `a`: episode, `b`: expansions.
    pub const TEARDOWN: &str = "hbfs.teardown";
    /// Idle controller re-planning for a live episode. `a`: previous episode.
    pub const REPLAN: &str = "hbfs.replan";
    /// Panic recovered during planning. `a`: total recovered panics.
    pub const PANIC: &str = "hbfs.panic";
    /// Periodic progress. `a`: frontier size, `b`: visited size.
    pub const REPORT: &str = "hbfs.report";
}

/// One planner decision as plain data: a tag and two tag-specific integers.
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

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
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

/// Forwards events to `tracing` at debug level, under the `hbfs::trace` target.
#[derive(Debug, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        tracing::debug!(
            target: "hbfs::trace",
            tick = event.tick,
            tag = %event.tag,
            a = event.a,
            b = event.b,
            "trace event"
        );
    }
}

/// In-memory event recording, in emission order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.is(tag))
    }

    pub fn count(&self, tag: &str) -> usize {
        self.with_tag(tag).count()
    }

    pub fn last(&self, tag: &str) -> Option<&TraceEvent> {
        self.events.iter().rev().find(|e| e.is(tag))
    }

    pub fn tags(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.tag.as_ref()).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// A [`TraceLog`] that stays readable after a clone of it was handed to a controller as its sink.
#[derive(Debug, Default, Clone)]
pub struct SharedTraceLog(Rc<RefCell<TraceLog>>);

impl SharedTraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Ref<'_, TraceLog> {
        self.0.borrow()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.0.borrow().count(tag)
    }

    /// Tags in emission order.
    pub fn tags(&self) -> Vec<String> {
        self.0.borrow().events.iter().map(|e| e.tag.to_string()).collect()
    }

    /// Drain the recorded events.
    pub fn take(&self) -> TraceLog {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl TraceSink for SharedTraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.0.borrow_mut().push(event);
    }
}
