//! Generic list slice: a typed CRUD cache for one resource.
//!
//! Operations are split in two halves: `begin_*` (pending) hands out a
//! `Ticket`, and `fulfill_*` / `reject` (resolved) apply the outcome. The
//! split keeps the slice free of I/O; `Dispatcher` glues both halves around
//! a transport call.
//!
//! Invariants:
//! - ids in `items` are unique;
//! - created records are prepended, fetched records keep server order;
//! - every record is media-normalized exactly once, on the way in;
//! - a failure never touches `items`.

use std::collections::{HashMap, HashSet};

use crate::error::ApiError;
use crate::media::MediaResolver;
use crate::resources::Resource;

use super::lifecycle::{Lifecycle, OperationKind, Outcome, Ticket};

#[derive(Debug, Clone)]
pub struct Slice<R: Resource> {
    items: Vec<R>,
    lifecycle: Lifecycle,
    update_targets: HashMap<u64, R::Id>,
    latest_update: HashMap<R::Id, u64>,
}

impl<R: Resource> Default for Slice<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            lifecycle: Lifecycle::default(),
            update_targets: HashMap::new(),
            latest_update: HashMap::new(),
        }
    }
}

impl<R: Resource> Slice<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_fetch_all(&mut self) -> Ticket {
        self.lifecycle.begin(OperationKind::Fetch)
    }

    pub fn begin_create(&mut self) -> Ticket {
        self.lifecycle.begin(OperationKind::Create)
    }

    pub fn begin_update(&mut self, id: R::Id) -> Ticket {
        let ticket = self.lifecycle.begin(OperationKind::Update);
        self.update_targets.insert(ticket.seq(), id);
        self.latest_update.insert(id, ticket.seq());
        ticket
    }

    pub fn begin_delete(&mut self) -> Ticket {
        self.lifecycle.begin(OperationKind::Delete)
    }

    /// Replaces the whole list with `records`, unless a newer fetch was
    /// dispatched after this one.
    pub fn fulfill_fetch_all(&mut self, ticket: Ticket, records: Vec<R>, media: &MediaResolver) -> Outcome {
        let live = self.lifecycle.settle(ticket);
        if !live || !self.lifecycle.is_latest(ticket) {
            tracing::debug!(resource = R::PLURAL, seq = ticket.seq(), "discarding superseded fetch");
            return Outcome::Stale;
        }

        let mut seen = HashSet::new();
        self.items = records
            .into_iter()
            .filter(|record| seen.insert(record.id()))
            .map(|mut record| {
                record.normalize_media(media);
                record
            })
            .collect();
        Outcome::Applied
    }

    /// Prepends the server's copy of a newly created record.
    pub fn fulfill_create(&mut self, ticket: Ticket, mut record: R, media: &MediaResolver) -> Outcome {
        if !self.lifecycle.settle(ticket) {
            return Outcome::Stale;
        }
        record.normalize_media(media);
        let id = record.id();
        self.items.retain(|item| item.id() != id);
        self.items.insert(0, record);
        Outcome::Applied
    }

    /// Replaces the record with the same id. An id that is not in the list
    /// leaves it untouched and is reported as `Outcome::Missing`.
    pub fn fulfill_update(&mut self, ticket: Ticket, mut record: R, media: &MediaResolver) -> Outcome {
        let target = self.update_targets.remove(&ticket.seq()).unwrap_or_else(|| record.id());
        let live = self.lifecycle.settle(ticket);
        let newest = self.latest_update.get(&target) == Some(&ticket.seq());
        if newest {
            self.latest_update.remove(&target);
        }
        if !live || !newest {
            tracing::debug!(resource = R::PLURAL, id = %target, seq = ticket.seq(), "discarding superseded update");
            return Outcome::Stale;
        }

        let id = record.id();
        match self.items.iter().position(|item| item.id() == id) {
            Some(index) => {
                record.normalize_media(media);
                self.items[index] = record;
                Outcome::Applied
            }
            None => {
                tracing::warn!(resource = R::PLURAL, %id, "update resolved for a record that is not in the list");
                Outcome::Missing
            }
        }
    }

    /// Removes the record with `id`; absent ids are a no-op.
    pub fn fulfill_delete(&mut self, ticket: Ticket, id: R::Id) -> Outcome {
        if !self.lifecycle.settle(ticket) {
            return Outcome::Stale;
        }
        self.items.retain(|item| item.id() != id);
        Outcome::Applied
    }

    /// Records the failure message. Data is left exactly as it was.
    /// A superseded fetch, or an update that is no longer the newest for its
    /// id, is reported as `Outcome::Stale` and leaves `error` alone.
    pub fn reject(&mut self, ticket: Ticket, error: &ApiError) -> Outcome {
        let superseded = match ticket.kind() {
            OperationKind::Fetch => !self.lifecycle.is_latest(ticket),
            OperationKind::Update => !self.is_latest_update(ticket),
            OperationKind::Create | OperationKind::Delete => false,
        };
        self.forget_update(ticket);
        let live = self.lifecycle.settle(ticket);
        if !live || superseded {
            return Outcome::Stale;
        }

        let message = error.message();
        let message = if message.trim().is_empty() {
            self.fallback_message(ticket.kind())
        } else {
            message
        };
        tracing::debug!(resource = R::PLURAL, operation = ticket.kind().verb(), %message, "operation failed");
        self.lifecycle.fail(message);
        Outcome::Applied
    }

    /// Releases a ticket whose result is no longer wanted. A later
    /// `fulfill_*` or `reject` with it is ignored.
    pub fn abandon(&mut self, ticket: Ticket) {
        self.forget_update(ticket);
        self.lifecycle.settle(ticket);
    }

    pub fn fallback_message(&self, kind: OperationKind) -> String {
        let noun = match kind {
            OperationKind::Fetch => R::PLURAL,
            _ => R::SINGULAR,
        };
        format!("Failed to {} {noun}", kind.verb())
    }

    fn is_latest_update(&self, ticket: Ticket) -> bool {
        self.update_targets
            .get(&ticket.seq())
            .is_some_and(|target| self.latest_update.get(target) == Some(&ticket.seq()))
    }

    fn forget_update(&mut self, ticket: Ticket) {
        if let Some(target) = self.update_targets.remove(&ticket.seq()) {
            if self.latest_update.get(&target) == Some(&ticket.seq()) {
                self.latest_update.remove(&target);
            }
        }
    }
}
