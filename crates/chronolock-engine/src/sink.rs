//! Notification sinks for escrow events.
//!
//! Sinks are observational only: the engine emits on successful create and
//! extend, and correctness never depends on what a sink does with the event.

use chronolock_types::EscrowEvent;

/// Receives structured events from the engine.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: &EscrowEvent);
}

/// Buffers every emitted event. Used by tests to observe engine behavior.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<EscrowEvent>,
}

impl RecordingSink {
    /// Create a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All events emitted so far, in order.
    #[must_use]
    pub fn events(&self) -> &[EscrowEvent] {
        &self.events
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&EscrowEvent> {
        self.events.last()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &EscrowEvent) {
        self.events.push(event.clone());
    }
}

/// Forwards events to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &EscrowEvent) {
        match event {
            EscrowEvent::UnlockScheduled {
                owner,
                chain,
                deadline,
            } => {
                tracing::info!(
                    kind = event.kind(),
                    %owner,
                    %chain,
                    %deadline,
                    "unlock scheduled"
                );
            }
        }
    }
}
