//! Request bookkeeping shared by list and singleton slices.
//!
//! Every dispatched operation receives a `Ticket` carrying a sequence number
//! that is monotonic per slice. The slice is `loading` while any ticket is
//! outstanding, so an early resolution cannot clear the flag for a request
//! that is still in flight.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Fetch,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    pub fn verb(self) -> &'static str {
        match self {
            OperationKind::Fetch => "fetch",
            OperationKind::Create => "create",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

/// Handle for one in-flight operation. Pass it back when the response
/// arrives (or to `abandon` when nobody cares about it any more).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a ticket must be fulfilled, rejected or abandoned"]
pub struct Ticket {
    kind: OperationKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What a resolution did to the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// An update targeted an id the slice does not hold; nothing changed.
    Missing,
    /// A newer operation superseded this one, or it was abandoned.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Lifecycle {
    next_seq: u64,
    in_flight: HashSet<u64>,
    latest: HashMap<OperationKind, u64>,
    error: Option<String>,
}

impl Lifecycle {
    pub(crate) fn begin(&mut self, kind: OperationKind) -> Ticket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight.insert(seq);
        self.latest.insert(kind, seq);
        self.error = None;
        Ticket { kind, seq }
    }

    pub(crate) fn loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks the ticket as resolved. Returns `false` if it was already
    /// resolved or abandoned.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        self.in_flight.remove(&ticket.seq)
    }

    pub(crate) fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.kind) == Some(&ticket.seq)
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}
