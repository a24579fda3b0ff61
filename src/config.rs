use image_host::ImageHostConfig;
use serde::{Deserialize, Serialize};

/// Client configuration for the gallery backend and the image host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Base URL of the REST backend
    pub api_base_url: String,
    /// Upload endpoint of the external image hosting service
    pub host_endpoint: String,
    /// API key for the image hosting service
    pub host_api_key: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            host_endpoint: "https://api.imgbb.com/1/upload".to_string(),
            host_api_key: String::new(),
        }
    }
}

impl GalleryConfig {
    /// Converts to TOML string
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Loads from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Connection settings for the image host crate
    pub fn host_config(&self) -> ImageHostConfig {
        ImageHostConfig {
            endpoint: self.host_endpoint.clone(),
            api_key: self.host_api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let mut config = GalleryConfig::default();
        config.api_base_url = "https://gallery.example".to_string();
        config.host_api_key = "secret".to_string();

        let serialized = config.to_toml().unwrap();
        let loaded = GalleryConfig::from_toml(&serialized).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_toml() {
        let config = GalleryConfig::from_toml(
            r#"
            api_base_url = "https://gallery.example"
            host_endpoint = "https://host.example/upload"
            host_api_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://gallery.example");
        assert_eq!(config.host_config().api_key, "secret");
    }
}
