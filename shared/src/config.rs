use serde::{Deserialize, Serialize};

use crate::api::{ApiQuery, Endpoint};
use crate::error::ConfigError;

// ===== CONFIG TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub api: ApiSection,
}

// Version of the config file format, checked on load
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSection {
    pub version: String,
}

impl AppSection {
    pub const CURRENT_VERSION: &'static str = "1.0.0";

    pub fn is_supported_version(&self) -> bool {
        matches!(self.version.as_str(), "1.0.0")
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
        }
    }
}

/// Location of the data API shared by every widget.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiSection {
    #[serde(default = "ApiSection::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiSection::default_page_size")]
    pub page_size: u32,
}

impl ApiSection {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MAX_PAGE_SIZE: u32 = 100;

    fn default_base_url() -> String {
        Self::DEFAULT_BASE_URL.to_string()
    }

    fn default_page_size() -> u32 {
        Self::DEFAULT_PAGE_SIZE
    }
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            page_size: Self::default_page_size(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Repair values that would break requests. Returns one warning per fix.
    pub fn validate_and_fix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.app.is_supported_version() {
            warnings.push(format!(
                "Unsupported config version '{}', using {}",
                self.app.version,
                AppSection::CURRENT_VERSION
            ));
            self.app = AppSection::default();
        }

        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            warnings.push(format!(
                "Empty API base URL, using {}",
                ApiSection::DEFAULT_BASE_URL
            ));
            self.api.base_url = ApiSection::default_base_url();
        } else if trimmed != self.api.base_url {
            self.api.base_url = trimmed.to_string();
        }

        let page_size = self.api.page_size.clamp(1, ApiSection::MAX_PAGE_SIZE);
        if page_size != self.api.page_size {
            warnings.push(format!(
                "API page size {} out of range, using {page_size}",
                self.api.page_size
            ));
            self.api.page_size = page_size;
        }

        warnings
    }

    /// Replace the base URL when `base_url` is set, then re-validate.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
            self.validate_and_fix();
        }
        self
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.api.base_url, endpoint.path())
    }

    /// Full URL including the encoded query, as used for logging.
    pub fn request_url(&self, endpoint: Endpoint, query: &ApiQuery) -> String {
        if query.is_empty() {
            self.endpoint_url(endpoint)
        } else {
            format!("{}?{query}", self.endpoint_url(endpoint))
        }
    }
}
