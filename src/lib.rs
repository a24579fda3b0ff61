//! # Gallery Client
//!
//! Client core for a paginated image gallery backed by a REST API.
//!
//! This crate provides the headless building blocks of the gallery:
//! - Cursor-based infinite pagination merged into one flat, ordered list
//! - A pure, declarative upload validation pipeline
//! - The submission workflow (validate → upload → persist → invalidate → reset)
//! - An HTTP client for the gallery backend
//!
//! ## Platform Separation
//!
//! Rendering and platform file picking stay in the application crate. The
//! optional `components` feature adds Dioxus components that render the
//! gallery from the state managed here.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use gallery_client::{GalleryConfig, ImageApi, PaginationController};
//!
//! let config = GalleryConfig::default();
//! let api = ImageApi::new(&config)?;
//!
//! let mut gallery = PaginationController::new();
//! gallery.fetch_next(&api).await;
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod pagination;
pub mod submit;
pub mod validate;

#[cfg(feature = "components")]
pub mod components;

pub use api::{ApiError, GalleryBackend, ImageApi, INITIAL_CURSOR};
pub use config::GalleryConfig;
pub use models::{DraftFile, ImageRecord, NewImage, Page, SubmissionDraft};
pub use pagination::{FetchPhase, PageRequest, PaginationController};
pub use submit::{attach_hosted_url, submit, SubmissionError};
pub use validate::{
    validate, Field, FieldError, ValidationErrors, ACCEPTED_IMAGE_TYPES, DESCRIPTION_MAX_CHARS,
    MAX_FILE_BYTES, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};

#[cfg(feature = "components")]
pub use components::{CardGrid, FullscreenImage, GalleryContext, GalleryScreen, UploadForm};
