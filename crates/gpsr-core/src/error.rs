//! Error types for the GPSR rehearsal stack.

use thiserror::Error;

/// Shared error type for the rehearsal stack.
///
/// The chat client, parser and paraphraser propagate these untouched; the
/// operation controller is the only layer that catches them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GpsrError {
    /// Endpoint unreachable, or the request came back with a non-success
    /// HTTP status (the status reason is carried in `message`).
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The endpoint answered successfully but the body was not the
    /// expected chat-completion shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A reply line matched none of the recognized list-item markers.
    /// The full raw reply is kept alongside for diagnostics.
    #[error("unrecognized reply line: '{line}'")]
    Parse { line: String, reply: String },

    /// Opaque failure from the external command generator.
    #[error("generator error: {0}")]
    Generator(String),

    /// An index-targeted operation pointed past the current record list.
    #[error("no command at index {0}")]
    NoSuchCommand(usize),
}

impl GpsrError {
    /// Creates a Transport error without an HTTP status (endpoint unreachable).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying a non-success HTTP status.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a Protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Creates a Generator error.
    pub fn generator(message: impl Into<String>) -> Self {
        Self::Generator(message.into())
    }

    /// Check if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a Parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// A type alias for `Result<T, GpsrError>`.
pub type Result<T> = std::result::Result<T, GpsrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_carries_reason() {
        let err = GpsrError::transport_status(503, "Service Unavailable");
        assert_eq!(err.to_string(), "transport error: Service Unavailable");
        assert!(err.is_transport());
    }

    #[test]
    fn parse_display_cites_offending_line() {
        let err = GpsrError::Parse {
            line: "Sure, here are three options:".to_string(),
            reply: "Sure, here are three options:\n- a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized reply line: 'Sure, here are three options:'"
        );
        assert!(err.is_parse());
    }
}
