//! Slice for resources with exactly one record (about page, home page).
//!
//! Fetch and update both replace the held record wholesale; there is never
//! a second instance. A result only lands if its ticket is newer than the
//! last one that landed, so a slow fetch cannot undo a later update.

use crate::error::ApiError;
use crate::media::MediaResolver;
use crate::resources::SingletonResource;

use super::lifecycle::{Lifecycle, OperationKind, Outcome, Ticket};

#[derive(Debug, Clone)]
pub struct SingletonSlice<S: SingletonResource> {
    content: Option<S>,
    lifecycle: Lifecycle,
    applied_seq: u64,
}

impl<S: SingletonResource> Default for SingletonSlice<S> {
    fn default() -> Self {
        Self {
            content: None,
            lifecycle: Lifecycle::default(),
            applied_seq: 0,
        }
    }
}

impl<S: SingletonResource> SingletonSlice<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&S> {
        self.content.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.lifecycle.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.lifecycle.begin(OperationKind::Fetch)
    }

    pub fn begin_update(&mut self) -> Ticket {
        self.lifecycle.begin(OperationKind::Update)
    }

    /// Replaces the held record with the server's copy.
    pub fn fulfill(&mut self, ticket: Ticket, mut record: S, media: &MediaResolver) -> Outcome {
        let live = self.lifecycle.settle(ticket);
        if !live || !self.lifecycle.is_latest(ticket) || ticket.seq() <= self.applied_seq {
            tracing::debug!(resource = S::LABEL, seq = ticket.seq(), "discarding superseded result");
            return Outcome::Stale;
        }
        record.normalize_media(media);
        self.content = Some(record);
        self.applied_seq = ticket.seq();
        Outcome::Applied
    }

    /// Failures are held to the same ordering as results: one that
    /// resolves after a newer result has landed is `Outcome::Stale`.
    pub fn reject(&mut self, ticket: Ticket, error: &ApiError) -> Outcome {
        let live = self.lifecycle.settle(ticket);
        if !live || !self.lifecycle.is_latest(ticket) || ticket.seq() <= self.applied_seq {
            tracing::debug!(resource = S::LABEL, seq = ticket.seq(), "discarding superseded failure");
            return Outcome::Stale;
        }
        let message = error.message();
        let message = if message.trim().is_empty() {
            self.fallback_message(ticket.kind())
        } else {
            message
        };
        tracing::debug!(resource = S::LABEL, operation = ticket.kind().verb(), %message, "operation failed");
        self.lifecycle.fail(message);
        Outcome::Applied
    }

    pub fn abandon(&mut self, ticket: Ticket) {
        self.lifecycle.settle(ticket);
    }

    pub fn fallback_message(&self, kind: OperationKind) -> String {
        format!("Failed to {} {}", kind.verb(), S::LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::HomeContent;

    fn home(title: &str, video: Option<&str>) -> HomeContent {
        HomeContent {
            id: 1,
            hero_title: title.to_string(),
            bg_video: video.map(str::to_string),
            ..Default::default()
        }
    }

    fn media() -> MediaResolver {
        MediaResolver::new("http://cdn.test")
    }

    #[test]
    fn fetch_then_update_replace_the_single_record() {
        let mut slot: SingletonSlice<HomeContent> = SingletonSlice::new();
        let t = slot.begin_fetch();
        slot.fulfill(t, home("Old", Some("/uploads/bg.mp4")), &media());
        assert_eq!(slot.content().unwrap().bg_video.as_deref(), Some("http://cdn.test/uploads/bg.mp4"));

        let t = slot.begin_update();
        slot.fulfill(t, home("New", None), &media());
        let content = slot.content().unwrap();
        assert_eq!(content.hero_title, "New");
        assert_eq!(content.bg_video, None);
        assert!(!slot.loading());
    }

    #[test]
    fn slow_fetch_cannot_overwrite_newer_update() {
        let mut slot: SingletonSlice<HomeContent> = SingletonSlice::new();
        let fetch = slot.begin_fetch();
        let update = slot.begin_update();
        slot.fulfill(update, home("Updated", None), &media());
        assert_eq!(slot.fulfill(fetch, home("Fetched", None), &media()), Outcome::Stale);
        assert_eq!(slot.content().unwrap().hero_title, "Updated");
    }

    #[test]
    fn failure_keeps_content_and_uses_fallback_when_blank() {
        let mut slot: SingletonSlice<HomeContent> = SingletonSlice::new();
        let t = slot.begin_fetch();
        slot.fulfill(t, home("Kept", None), &media());

        let t = slot.begin_update();
        slot.reject(t, &ApiError::Rejected { message: " ".to_string() });
        assert_eq!(slot.error(), Some("Failed to update home content"));
        assert_eq!(slot.content().unwrap().hero_title, "Kept");
    }

    #[test]
    fn late_fetch_failure_after_newer_update_is_stale() {
        let mut slot: SingletonSlice<HomeContent> = SingletonSlice::new();
        let fetch = slot.begin_fetch();
        let update = slot.begin_update();
        assert_eq!(slot.fulfill(update, home("Updated", None), &media()), Outcome::Applied);

        let late = ApiError::Network("late".to_string());
        assert_eq!(slot.reject(fetch, &late), Outcome::Stale);
        assert_eq!(slot.error(), None);
        assert_eq!(slot.content().unwrap().hero_title, "Updated");
        assert!(!slot.loading());
    }
}
