//! Diagnostic tracing of the command interpreter.

use g15_core::{Command, FlipFlops};

/// One executed command, captured for a diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Rotational position at which the command executed.
    pub l: u8,
    pub command: Command,
    pub flipflops_before: FlipFlops,
    pub flipflops_after: FlipFlops,
}

/// A sink that receives one record per executed command.
pub trait TraceSink {
    fn record(&mut self, record: TraceRecord);
}

/// The simplest possible sink: collect everything in memory.
#[derive(Debug, Default)]
pub struct VecTraceSink(pub Vec<TraceRecord>);

impl TraceSink for VecTraceSink {
    fn record(&mut self, record: TraceRecord) {
        self.0.push(record);
    }
}
