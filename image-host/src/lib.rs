//! # Image Host
//!
//! A minimal client for an external image hosting service.
//!
//! The gallery only needs URL-in/URL-out semantics from its host: raw
//! file bytes go in, a hosted absolute URL comes out. This crate wraps
//! that exchange for ImgBB-style upload endpoints (base64 form upload
//! with an API key).
//!
//! ## Separation of Concerns
//!
//! This crate focuses solely on hosting uploads. It does **not**:
//! - Validate files (handled by the gallery client)
//! - Store the returned URL (handled by the application)
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use image_host::{ImageHostConfig, ImageHostService};
//!
//! let service = ImageHostService::new(ImageHostConfig {
//!     endpoint: "https://api.imgbb.com/1/upload".to_string(),
//!     api_key: "...".to_string(),
//! });
//! let url = service.upload_image("sunset.png", &bytes).await?;
//! ```

pub mod models;
pub mod service;

pub use models::{HostUploadResponse, HostedImage};
pub use service::{HostError, ImageHostConfig, ImageHostService};
