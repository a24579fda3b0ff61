use crate::config::GalleryConfig;
use crate::models::{ImageRecord, NewImage, Page};

/// Sentinel cursor sent with the first page request
pub const INITIAL_CURSOR: &str = "0";

/// Error type for backend API operations
#[derive(Debug)]
pub enum ApiError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            ApiError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Seam between the gallery core and the HTTP backend
///
/// The pagination controller and the submission workflow are generic over
/// this trait; [`ImageApi`] is the production implementation and tests
/// substitute in-memory stubs.
#[allow(async_fn_in_trait)]
pub trait GalleryBackend {
    /// Fetches one page of the listing. `after` is the continuation
    /// cursor of the previous page; `None` requests the first page.
    async fn list_images(&self, after: Option<&str>) -> Result<Page, ApiError>;

    /// Creates a new image record and returns it as stored by the server
    async fn create_image(&self, image: &NewImage) -> Result<ImageRecord, ApiError>;
}

/// HTTP client for the gallery backend
#[derive(Clone)]
pub struct ImageApi {
    base_url: String,
    client: reqwest::Client,
}

impl ImageApi {
    /// Creates a client for the configured backend base URL
    pub fn new(config: &GalleryConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("GalleryClient/0.1.0")
            .build()
            .map_err(|e| ApiError::NetworkError(format!("Client build failed: {}", e)))?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn images_url(&self) -> String {
        format!("{}/api/images", self.base_url)
    }
}

impl GalleryBackend for ImageApi {
    async fn list_images(&self, after: Option<&str>) -> Result<Page, ApiError> {
        let response = self
            .client
            .get(self.images_url())
            .query(&[("after", after.unwrap_or(INITIAL_CURSOR))])
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::ServerError(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        response
            .json::<Page>()
            .await
            .map_err(|e| ApiError::JsonError(format!("Failed to parse listing: {}", e)))
    }

    async fn create_image(&self, image: &NewImage) -> Result<ImageRecord, ApiError> {
        let response = self
            .client
            .post(self.images_url())
            .json(image)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::ServerError(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        response
            .json::<ImageRecord>()
            .await
            .map_err(|e| ApiError::JsonError(format!("Failed to parse created record: {}", e)))
    }
}
