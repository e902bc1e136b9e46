/// Failure of a single request against the data API.
///
/// Every variant is terminal for the request that produced it and never
/// affects other widgets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("network request failed: {0}")]
    Transport(String),
    #[error("Network response was not ok (HTTP {status})")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code() {
        let error = FetchError::Status { status: 503 };
        assert_eq!(error.to_string(), "Network response was not ok (HTTP 503)");
        assert!(!error.is_transport());
    }

    #[test]
    fn config_parse_error_wraps_toml() {
        let toml_error = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let error = ConfigError::from(toml_error);
        assert!(error.to_string().starts_with("failed to parse config"));
    }
}
