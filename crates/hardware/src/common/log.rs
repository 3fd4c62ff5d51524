//! Injected pipeline logging.
//!
//! Stages never consult a global switch to decide whether to log. Instead the
//! driver hands every stage a `&dyn PipelineLog` for the cycle:
//! 1. **`NullLog`:** Discards everything; the default for tests and batch runs.
//! 2. **`TracingLog`:** Forwards to `tracing::debug!` with a `stage` field.
//! 3. **`RecordingLog`:** Keeps events in memory so tests can assert on them.

use std::cell::RefCell;
use std::fmt;

/// Pipeline component that emitted an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and operand forwarding.
    Decode,
    /// ALU and branch resolution.
    Execute,
    /// Load extraction.
    Memory,
    /// Register commit.
    Writeback,
    /// Single-port memory arbiter.
    Arbiter,
}

impl Stage {
    /// Short lowercase label used as the `stage` field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Execute => "execute",
            Self::Memory => "memory",
            Self::Writeback => "writeback",
            Self::Arbiter => "arbiter",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sink for per-cycle pipeline events.
pub trait PipelineLog: fmt::Debug {
    /// Whether events will be observed at all.
    ///
    /// Stages check this before formatting anything.
    fn enabled(&self) -> bool {
        true
    }

    /// Records one event.
    ///
    /// # Arguments
    ///
    /// * `stage` - Component that produced the event.
    /// * `cycle` - Cycle number the event belongs to.
    /// * `message` - Pre-formatted description.
    fn event(&self, stage: Stage, cycle: u64, message: fmt::Arguments<'_>);
}

/// Logger that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLog;

impl PipelineLog for NullLog {
    fn enabled(&self) -> bool {
        false
    }

    fn event(&self, _stage: Stage, _cycle: u64, _message: fmt::Arguments<'_>) {}
}

/// Logger that forwards events to the `tracing` subscriber at DEBUG level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl PipelineLog for TracingLog {
    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::DEBUG)
    }

    fn event(&self, stage: Stage, cycle: u64, message: fmt::Arguments<'_>) {
        tracing::debug!(stage = stage.name(), cycle, "{message}");
    }
}

/// A captured event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    /// Emitting component.
    pub stage: Stage,
    /// Cycle number.
    pub cycle: u64,
    /// Rendered message.
    pub message: String,
}

/// Logger that stores events for later inspection.
#[derive(Debug, Default)]
pub struct RecordingLog {
    records: RefCell<Vec<LogRecord>>,
}

impl RecordingLog {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    /// Returns the events emitted by one stage.
    pub fn records_for(&self, stage: Stage) -> Vec<LogRecord> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.stage == stage)
            .cloned()
            .collect()
    }
}

impl PipelineLog for RecordingLog {
    fn event(&self, stage: Stage, cycle: u64, message: fmt::Arguments<'_>) {
        self.records.borrow_mut().push(LogRecord {
            stage,
            cycle,
            message: message.to_string(),
        });
    }
}

/// Emits an event through a `PipelineLog` only when it is enabled.
macro_rules! pipe_log {
    ($log:expr, $stage:expr, $cycle:expr, $($arg:tt)+) => {
        if $log.enabled() {
            $log.event($stage, $cycle, format_args!($($arg)+));
        }
    };
}

pub(crate) use pipe_log;
