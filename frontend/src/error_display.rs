use shared::FetchError;

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorAlert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub technical_error: String, // Raw technical error for console logging
}

impl ErrorAlert {
    pub fn new_config_error(error: String) -> Self {
        Self {
            id: "config_error".to_string(),
            title: "Configuration Error".to_string(),
            message: make_error_user_friendly(&error),
            technical_error: format!("Error loading dashboard config: {}", error),
        }
    }

    /// Failed request of one widget; `source` names what was being fetched.
    pub fn new_fetch_error(widget: &str, source: &str, error: &FetchError) -> Self {
        let technical = error.to_string();
        Self {
            id: format!("fetch_error_{}", widget.replace(' ', "_")),
            title: format!("{widget} unavailable"),
            message: make_error_user_friendly(&technical),
            technical_error: format!("Error fetching {} for {}: {}", source, widget, technical),
        }
    }
}

pub fn make_error_user_friendly(error: &str) -> String {
    let error_lower = error.to_lowercase();

    if error_lower.contains("http 404") {
        "The requested data does not exist.".to_string()
    } else if error_lower.contains("http 5") {
        "The data service failed. Please try again later.".to_string()
    } else if error_lower.contains("network") || error_lower.contains("failed to fetch") {
        "Connection error. Please check your network connection.".to_string()
    } else if error_lower.contains("invalid response body") {
        "The data service sent an unexpected response.".to_string()
    } else {
        error.trim().to_string()
    }
}

/// Log error to browser console only (no visible notification).
/// Used for chart and option-list failures, which keep their stale data.
pub fn log_error_console_only(alert: ErrorAlert) {
    zoon::eprintln!("Error: {}", alert.technical_error);
}
