//! Cursor-based pagination over the image listing
//!
//! [`PaginationController`] accumulates pages fetched from the backend
//! into one ordered sequence and tracks loading, error and exhaustion
//! state. At most one fetch is in flight at a time; starting another
//! while one is running is a no-op. A failed fetch is terminal for that
//! attempt and requires a fresh user-triggered fetch.
//!
//! The controller itself performs no I/O: [`PaginationController::begin`]
//! hands out the cursor to fetch and [`PaginationController::apply`]
//! merges the completion, so UI layers with their own task model can
//! drive it directly. [`PaginationController::fetch_next`] combines both
//! around a [`GalleryBackend`] call.

use crate::api::{ApiError, GalleryBackend};
use crate::models::{ImageRecord, Page};
use std::collections::HashSet;

/// Lifecycle of the paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch issued yet, or state was discarded for a refetch
    Idle,
    /// Initial fetch in flight
    Loading,
    /// A further page fetch in flight
    LoadingMore,
    /// At least one page merged, no fetch in flight
    Ready,
    /// The most recent fetch failed
    Error,
}

/// Cursor for the next fetch, handed out by [`PaginationController::begin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// First page; the caller sends the sentinel cursor
    Initial,
    /// Continue after the given server cursor
    After(String),
}

impl PageRequest {
    /// Cursor value for the API call; `None` means the sentinel first page
    pub fn after(&self) -> Option<&str> {
        match self {
            PageRequest::Initial => None,
            PageRequest::After(cursor) => Some(cursor.as_str()),
        }
    }
}

/// Accumulates pages of the image listing into one flat, ordered sequence
#[derive(Debug, Clone)]
pub struct PaginationController {
    items: Vec<ImageRecord>,
    seen_ids: HashSet<String>,
    next_cursor: Option<String>,
    has_more: bool,
    phase: FetchPhase,
}

impl PaginationController {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen_ids: HashSet::new(),
            next_cursor: None,
            has_more: true,
            phase: FetchPhase::Idle,
        }
    }

    /// Starts a fetch and returns the cursor to request
    ///
    /// Returns `None` (a no-op, no network call) while a fetch is already
    /// in flight or the listing is exhausted. A fetch after a failure is
    /// permitted; it retries the same cursor.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            log::debug!("page fetch already in flight, ignoring");
            return None;
        }
        if self.phase == FetchPhase::Ready && !self.has_more {
            log::debug!("listing exhausted, nothing to fetch");
            return None;
        }

        let request = match &self.next_cursor {
            Some(cursor) => PageRequest::After(cursor.clone()),
            None => PageRequest::Initial,
        };
        self.phase = if self.items.is_empty() && self.next_cursor.is_none() {
            FetchPhase::Loading
        } else {
            FetchPhase::LoadingMore
        };
        Some(request)
    }

    /// Merges the completion of the in-flight fetch
    ///
    /// On success the page's records are appended in order (duplicates
    /// across pages are surfaced, never deduplicated) and the cursor and
    /// `has_more` are updated from the page. On failure the controller
    /// enters the error state and keeps what it has accumulated.
    ///
    /// A completion arriving while no fetch is in flight belongs to an
    /// orphaned fetch (the state was discarded meanwhile) and is dropped.
    pub fn apply(&mut self, outcome: Result<Page, ApiError>) {
        if !self.is_loading() {
            log::debug!("dropping page completion with no fetch in flight");
            return;
        }

        match outcome {
            Ok(page) => {
                let next = page.next_cursor().map(str::to_string);
                for record in &page.data {
                    if !self.seen_ids.insert(record.id.clone()) {
                        log::warn!(
                            "duplicate image id {} across pages; keeping both entries",
                            record.id
                        );
                    }
                }
                log::debug!("merged page with {} records", page.data.len());
                self.items.extend(page.data);
                self.has_more = next.is_some();
                self.next_cursor = next;
                self.phase = FetchPhase::Ready;
            }
            Err(e) => {
                log::error!("image listing fetch failed: {}", e);
                self.phase = FetchPhase::Error;
            }
        }
    }

    /// Discards accumulated state so the next fetch starts from the
    /// beginning. Called by the submission workflow after a successful
    /// create, and usable as a user-triggered refresh.
    pub fn refetch_from_start(&mut self) {
        self.items.clear();
        self.seen_ids.clear();
        self.next_cursor = None;
        self.has_more = true;
        self.phase = FetchPhase::Idle;
    }

    /// Runs one fetch round-trip against the backend
    ///
    /// No-op if a fetch is already in flight or the listing is exhausted.
    /// Failures are absorbed into the error state rather than returned.
    pub async fn fetch_next<B: GalleryBackend>(&mut self, backend: &B) {
        let request = match self.begin() {
            Some(request) => request,
            None => return,
        };
        let outcome = backend.list_images(request.after()).await;
        self.apply(outcome);
    }

    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading | FetchPhase::LoadingMore)
    }

    pub fn is_error(&self) -> bool {
        self.phase == FetchPhase::Error
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}
