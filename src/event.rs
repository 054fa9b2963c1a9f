// src/event.rs
use crate::errors::ApiError;
use crate::podcast::{PodcastDetail, PodcastSummary};

/// Token identifying one detail request. Later selections get larger tokens,
/// which is how stale completions are recognized and discarded.
pub type RequestToken = u64;

/// Completions sent back to the UI loop by spawned fetch tasks. Only the
/// loop mutates the app, so state changes stay on one logical thread.
#[derive(Debug)]
pub enum AppEvent {
    /// The one-shot catalog fetch finished, successfully or not.
    CatalogLoaded(Result<Vec<PodcastSummary>, ApiError>),

    /// A detail fetch finished. `token` names the selection that issued it;
    /// only the most recently issued token may update the overlay.
    DetailLoaded { token: RequestToken, result: Result<PodcastDetail, ApiError> },
}
