//! Error types for the DDNS synchronization agent
//!
//! Every fallible operation in the library crates returns [`Result`]. The
//! decision whether an error ends a single cycle or the whole process is made
//! by the scheduler and the daemon, never at the point of failure.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or malformed settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current public address could not be determined
    #[error("IP resolution error: {0}")]
    Resolution(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// No zone matched the configured zone name
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// No record of the requested type matched the configured record name
    #[error("No {record_type} records found for '{name}'")]
    RecordNotFound {
        /// Record type that was queried
        record_type: String,
        /// Record name that was queried
        name: String,
    },

    /// More than one zone or record matched and the strict match policy is active
    #[error("{count} {what}s match '{name}', refusing to pick one")]
    AmbiguousMatch {
        /// "zone" or "record"
        what: &'static str,
        /// Name that was queried
        name: String,
        /// Number of matches returned by the provider
        count: usize,
    },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The operation was abandoned because shutdown was requested
    #[error("Operation cancelled by shutdown")]
    Cancelled,

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], used in log fields and failure decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Resolution,
    Lookup,
    Provider,
    Cancelled,
    Other,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Resolution => "resolution",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Provider => "provider",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a "zone not found" error
    pub fn zone_not_found(zone: impl Into<String>) -> Self {
        Self::ZoneNotFound(zone.into())
    }

    /// Create a "record not found" error
    pub fn record_not_found(record_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RecordNotFound {
            record_type: record_type.into(),
            name: name.into(),
        }
    }

    /// Create an ambiguous-match error
    pub fn ambiguous(what: &'static str, name: impl Into<String>, count: usize) -> Self {
        Self::AmbiguousMatch {
            what,
            name: name.into(),
            count,
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Configuration,
            Error::Resolution(_) => ErrorKind::Resolution,
            Error::ZoneNotFound(_) | Error::RecordNotFound { .. } | Error::AmbiguousMatch { .. } => {
                ErrorKind::Lookup
            }
            Error::Http(_)
            | Error::Provider { .. }
            | Error::Authentication(_)
            | Error::RateLimited(_) => ErrorKind::Provider,
            Error::Cancelled => ErrorKind::Cancelled,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Whether this error only reports that shutdown interrupted the work
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_share_a_kind() {
        assert_eq!(Error::zone_not_found("example.com").kind(), ErrorKind::Lookup);
        assert_eq!(
            Error::record_not_found("A", "home.example.com").kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            Error::ambiguous("zone", "example.com", 2).kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_messages_name_the_record() {
        let err = Error::record_not_found("A", "home.example.com");
        assert_eq!(err.to_string(), "No A records found for 'home.example.com'");

        let err = Error::ambiguous("record", "home.example.com", 3);
        assert_eq!(
            err.to_string(),
            "3 records match 'home.example.com', refusing to pick one"
        );
    }

    #[test]
    fn test_transport_and_api_errors_are_provider_errors() {
        for err in [
            Error::http("connection reset"),
            Error::auth("bad token"),
            Error::rate_limited("slow down"),
            Error::provider("cloudflare", "failed to parse list zones response"),
        ] {
            assert_eq!(err.kind(), ErrorKind::Provider, "{}", err);
        }
    }

    #[test]
    fn test_cancelled() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::resolution("timeout").is_cancelled());
        assert_eq!(Error::Cancelled.kind().to_string(), "cancelled");
    }
}
