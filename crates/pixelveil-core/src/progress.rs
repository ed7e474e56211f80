//! Phase and progress reporting hooks.

/// Phase of the operation currently holding the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No operation in flight.
    Idle,
    /// Validation and envelope construction.
    Analyzing,
    /// Bit embedding or extraction; the progress-emitting phase.
    Processing,
    /// Results being handed back to the driver.
    Rendering,
}

/// Receives phase transitions and progress percentages.
///
/// Percentages for one operation are monotone non-decreasing and reach
/// 100 before the operation returns. Both hooks default to no-ops so
/// sinks can observe only what they care about.
pub trait ProgressSink {
    /// The orchestrator entered `phase`.
    fn phase(&mut self, phase: Phase) {
        let _ = phase;
    }

    /// Embedding/extraction progress, in `0..=100`.
    fn percent(&mut self, percent: u8) {
        let _ = percent;
    }
}

/// Sink for callers that do not observe progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {}
