//! Loads every slice from the configured backend and reports what arrived.
//!
//! Reads `CLUB_API_BASE_URL`, `CLUB_MEDIA_BASE_URL` and `CLUB_LOG_LEVEL`
//! (or `RUST_LOG`). Exits non-zero if any resource failed to load.

use std::process::ExitCode;

use club_core::{ApiError, ClientConfig, ClubState, Dispatcher, Outcome, UreqTransport};

fn report(resource: &str, result: Result<Outcome, ApiError>, count: usize) -> bool {
    match result {
        Ok(_) => {
            tracing::info!(resource, count, "loaded");
            true
        }
        Err(err) => {
            tracing::warn!(resource, error = %err, "failed to load");
            false
        }
    }
}

fn main() -> ExitCode {
    let config = ClientConfig::from_env();
    tracing_subscriber::fmt().with_env_filter(config.env_filter()).init();
    tracing::info!(api = %config.api_base_url, media = %config.media_base_url, "syncing");

    let api = Dispatcher::new(&config, UreqTransport::new());
    let mut state = ClubState::new();

    let results = [
        {
            let r = api.fetch_all(&mut state.events, None);
            report("events", r, state.events.len())
        },
        {
            let r = api.fetch_all(&mut state.news, None);
            report("news", r, state.news.len())
        },
        {
            let r = api.fetch_all(&mut state.products, None);
            report("products", r, state.products.len())
        },
        {
            let r = api.fetch_all(&mut state.categories, None);
            report("categories", r, state.categories.len())
        },
        {
            let r = api.fetch_all(&mut state.gallery, None);
            report("gallery", r, state.gallery.len())
        },
        {
            let r = api.fetch_all(&mut state.milestones, None);
            report("milestones", r, state.milestones.len())
        },
        {
            let r = api.fetch_singleton(&mut state.about);
            report("about", r, usize::from(state.about.content().is_some()))
        },
        {
            let r = api.fetch_singleton(&mut state.home);
            report("home", r, usize::from(state.home.content().is_some()))
        },
    ];

    if results.iter().all(|ok| *ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
