//! API client core and resource state for the club website.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps one typed slice of
//! client state per resource: events, news, products, categories, gallery,
//! milestones, plus the singleton about and home pages.
//!
//! # Design
//! - `ApiClient` is stateless and generic over `Resource`; each resource is
//!   a small configuration (path, draft payload, media fields).
//! - `Slice` / `SingletonSlice` implement the pending/fulfilled/rejected
//!   lifecycle once. Tickets with per-slice sequence numbers keep stale
//!   responses from overwriting newer state.
//! - Media paths are resolved against a separate media host exactly once,
//!   when a record enters a slice.
//! - `Dispatcher` ties client, `Transport` and slices together for callers
//!   that just want a blocking round-trip.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod media;
pub mod multipart;
pub mod resources;
pub mod selectors;
pub mod state;
pub mod transport;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use dispatcher::Dispatcher;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use media::{resolve_media_url, MediaResolver};
pub use multipart::{Attachment, MultipartForm};
pub use resources::{Draft, ListFilter, Resource, Retrievable, SingletonResource};
pub use state::{ClubState, OperationKind, Outcome, SingletonSlice, Slice, Ticket};
pub use transport::{Transport, UreqTransport};
