use serde::{Deserialize, Serialize};

/// Response from the hosting service's upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostUploadResponse {
    pub data: HostedImage,
    pub success: bool,
    pub status: u16,
}

/// The hosted image as described by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostedImage {
    /// Absolute URL of the hosted image
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
}
