//! Client errors
//!
//! Two families: [`Fault`] travels inside envelopes and describes an expected
//! failure, [`ClientError`] escapes to the caller for everything the client
//! refuses to guess about.

use std::fmt;

/// A failed outbound call as reported by the transport.
///
/// `status` is the structured HTTP status when the transport saw a reply.
/// Connection-level failures leave it empty and only carry a description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportFault {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Why an envelope is not OK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("remote fault: {0}")]
    Remote(TransportFault),

    /// Input rejected locally; no request was sent.
    #[error("precondition failed: {0}")]
    Precondition(String),
}

impl Fault {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Errors that escape the envelope surface.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A failed call whose status could not be mapped to a known kind.
    #[error("unclassified failure: {0}")]
    Unclassified(TransportFault),

    #[error("failed to decode response from `{uri}`: {source}")]
    Decode {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("http client setup failed: {0}")]
    Http(String),
}

impl ClientError {
    pub fn config(message: impl fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// The underlying transport fault, if this error came from a remote call.
    pub fn transport_fault(&self) -> Option<&TransportFault> {
        match self {
            Self::Unclassified(fault) => Some(fault),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_display_includes_message() {
        let fault = Fault::Remote(TransportFault::with_status(404, "(404) Not Found"));
        assert_eq!(fault.to_string(), "remote fault: (404) Not Found");

        let fault = Fault::precondition("case title must not be blank");
        assert_eq!(
            fault.to_string(),
            "precondition failed: case title must not be blank"
        );
    }

    #[test]
    fn unclassified_exposes_transport_fault() {
        let err = ClientError::Unclassified(TransportFault::new("connection refused"));
        assert_eq!(
            err.transport_fault().map(|f| f.message.as_str()),
            Some("connection refused")
        );
        assert!(ClientError::config("x").transport_fault().is_none());
    }
}
