/// Error type for the linknova client library
///
/// Everything that comes back from the server or the transport is folded into
/// [`LinkNovaError::Api`] with an HTTP-like status code, so callers can decide
/// how to report a failure from the status alone:
///
/// * `0`   - network failure (connection refused, DNS, broken body)
/// * `408` - the request timed out
/// * `4xx` - client error
/// * `5xx` - server error
#[derive(Debug, thiserror::Error)]
pub enum LinkNovaError {
    /// API or transport failure carrying an HTTP-like status
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    /// Invalid input or arguments, rejected before any request is sent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (config files, terminal)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// HTML parsing errors
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

pub const STATUS_NETWORK: u16 = 0;
pub const STATUS_TIMEOUT: u16 = 408;

/// Result type alias using LinkNovaError
pub type Result<T> = std::result::Result<T, LinkNovaError>;

impl LinkNovaError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        LinkNovaError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::api(STATUS_NETWORK, message)
    }

    pub fn timeout() -> Self {
        Self::api(STATUS_TIMEOUT, "Request timeout")
    }

    /// HTTP-like status, `None` for errors raised locally
    pub fn status(&self) -> Option<u16> {
        match self {
            LinkNovaError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.status() == Some(STATUS_NETWORK)
    }

    pub fn is_timeout(&self) -> bool {
        self.status() == Some(STATUS_TIMEOUT)
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Short label used when reporting the failure to a user
    pub fn category(&self) -> &'static str {
        match self {
            LinkNovaError::Api { status, .. } => match *status {
                STATUS_NETWORK => "network error",
                STATUS_TIMEOUT => "timeout",
                401 | 403 => "unauthorized",
                404 => "not found",
                400..=499 => "client error",
                500..=599 => "server error",
                _ => "request failed",
            },
            LinkNovaError::InvalidInput(_) => "invalid input",
            LinkNovaError::Config(_) => "config error",
            _ => "error",
        }
    }
}

impl From<String> for LinkNovaError {
    fn from(s: String) -> Self {
        LinkNovaError::Other(s)
    }
}

impl From<&str> for LinkNovaError {
    fn from(s: &str) -> Self {
        LinkNovaError::Other(s.to_string())
    }
}

impl From<reqwest::Error> for LinkNovaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return LinkNovaError::timeout();
        }
        if let Some(status) = err.status() {
            return LinkNovaError::api(status.as_u16(), err.to_string());
        }
        if err.is_decode() {
            return LinkNovaError::Json(err.to_string());
        }
        LinkNovaError::network(format!("Network error: {}", err))
    }
}

impl From<serde_yaml::Error> for LinkNovaError {
    fn from(err: serde_yaml::Error) -> Self {
        LinkNovaError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for LinkNovaError {
    fn from(err: serde_json::Error) -> Self {
        LinkNovaError::Json(err.to_string())
    }
}

impl From<tl::ParseError> for LinkNovaError {
    fn from(err: tl::ParseError) -> Self {
        LinkNovaError::HtmlParse(err.to_string())
    }
}
