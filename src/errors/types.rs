//! Error types for the Huawei Push Kit client
//!
//! Every public operation returns [`PushResult`]. Failures are grouped by the
//! stage that produced them: configuration, authentication against the OAuth
//! server, the push API itself, the HTTP transport, or JSON handling.

use thiserror::Error;

/// Main client error type
#[derive(Error, Debug)]
pub enum PushError {
    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // OAuth token errors
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    // Push API errors
    #[error("Push API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    // Network and HTTP errors
    #[error("HTTP request failed: {method} {url}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Serialization errors
    #[error("JSON error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using PushError
pub type PushResult<T> = Result<T, PushError>;

impl PushError {
    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Authentication error that has no HTTP response attached
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Create an Authentication error from a rejected token request
    pub fn authentication_status(status: u16, body: impl Into<String>) -> Self {
        Self::Authentication {
            message: format!("token endpoint returned HTTP {status}"),
            status: Some(status),
            body: Some(body.into()),
        }
    }

    /// Create a new Api error
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a Transport error for a failed request
    pub fn transport(
        method: impl Into<String>,
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            method: method.into(),
            url: url.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Serialization error with source
    pub fn serialization(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body carried by the error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. } => body.as_deref(),
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Authentication { .. } => "auth",
            Self::Api { .. } => "api",
            Self::Transport { .. } => "network",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for PushError {
    fn from(err: serde_json::Error) -> Self {
        let context = if err.is_syntax() {
            format!("JSON syntax error at line {} column {}", err.line(), err.column())
        } else if err.is_data() {
            "JSON data error".to_string()
        } else if err.is_eof() {
            "Unexpected end of JSON input".to_string()
        } else {
            "JSON serialization error".to_string()
        };

        Self::Serialization {
            context,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for PushError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("invalid config file: {}", err.message()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<url::ParseError> for PushError {
    fn from(err: url::ParseError) -> Self {
        Self::config_with_source("invalid endpoint URL", err)
    }
}
