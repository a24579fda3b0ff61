use crate::models::HostUploadResponse;
use base64::{engine::general_purpose, Engine as _};

/// Error type for hosting operations
#[derive(Debug)]
pub enum HostError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
    /// The service answered but refused the upload
    Rejected(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            HostError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            HostError::ServerError(msg) => write!(f, "Server error: {}", msg),
            HostError::Rejected(msg) => write!(f, "Upload rejected: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Connection settings for the hosting service
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    /// Full URL of the upload endpoint
    pub endpoint: String,
    /// API key sent with every upload
    pub api_key: String,
}

/// Client for the external image hosting service
#[derive(Clone)]
pub struct ImageHostService {
    config: ImageHostConfig,
}

impl ImageHostService {
    /// Create a new hosting service client
    pub fn new(config: ImageHostConfig) -> Self {
        Self { config }
    }

    /// Uploads raw image bytes and returns the hosted URL
    ///
    /// The payload is sent base64-encoded as a form field, the way
    /// ImgBB-style endpoints expect it.
    pub async fn upload_image(&self, name: &str, data: &[u8]) -> Result<String, HostError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("ImageHost/0.1.0")
            .build()
            .map_err(|e| HostError::NetworkError(format!("Client build failed: {}", e)))?;

        let encoded = general_purpose::STANDARD.encode(data);

        let response = client
            .post(&self.config.endpoint)
            .form(&[
                ("key", self.config.api_key.as_str()),
                ("name", name),
                ("image", encoded.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HostError::NetworkError(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HostError::ServerError(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        let result = response
            .json::<HostUploadResponse>()
            .await
            .map_err(|e| HostError::JsonError(format!("Failed to parse response: {}", e)))?;

        if !result.success {
            return Err(HostError::Rejected(format!(
                "Host answered with status {}",
                result.status
            )));
        }

        log::info!("uploaded {} ({} bytes) to image host", name, data.len());
        Ok(result.data.url)
    }
}
