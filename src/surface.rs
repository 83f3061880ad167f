//! Request gating for interactive surfaces.
//!
//! A surface claims the gate before dispatching a model request and presents
//! its ticket when the response lands. Responses carrying a stale ticket,
//! begun before a supersede or a reset, must be dropped instead of applied.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof that a request slot was claimed from a [`RequestGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    sequence: u64,
}

/// Single-flight gate with stale-response detection.
#[derive(Debug, Default)]
pub struct RequestGate {
    busy: AtomicBool,
    sequence: AtomicU64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request currently holds the gate
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claim the gate; `None` while another request holds it
    pub fn try_begin(&self) -> Option<RequestTicket> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(self.issue())
    }

    /// Claim the gate unconditionally, superseding any request in flight.
    /// The superseded request's ticket goes stale immediately.
    pub fn begin(&self) -> RequestTicket {
        self.busy.store(true, Ordering::SeqCst);
        self.issue()
    }

    /// Whether the ticket still names the latest request
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket.sequence
    }

    /// Release the gate. Stale tickets release nothing; returns whether the
    /// ticket was current.
    pub fn finish(&self, ticket: &RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.busy.store(false, Ordering::SeqCst);
        true
    }

    /// Drop the in-flight request, if any, and invalidate its ticket
    pub fn reset(&self) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
        self.busy.store(false, Ordering::SeqCst);
    }

    fn issue(&self) -> RequestTicket {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { sequence }
    }
}
