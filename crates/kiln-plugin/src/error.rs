//! Error taxonomy for host proxy calls.

use crate::channel::ChannelError;
use thiserror::Error;

/// Why a host proxy call failed.
///
/// The three kinds are deliberately kept apart: a transport failure, a
/// protocol defect, and a host refusal mean different things to a plugin
/// and must never be coerced into one another. An operation that ran and
/// did not succeed is not an error at all; it comes back as a result value
/// with `succeeded: false`.
#[derive(Error, Debug)]
pub enum PluginError {
    /// The channel failed mid round trip. Surfaced verbatim.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The host broke the request/reply discipline.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The host explicitly declined or failed the request. The message is
    /// the host's, passed through unmodified.
    #[error("{0}")]
    HostReported(String),
}

/// A host/plugin protocol defect: the round trip completed at the
/// transport level but the reply discipline was violated. Usually a
/// version or implementation mismatch between the two processes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The channel closed cleanly before a reply arrived.
    #[error("host closed the channel before answering a {request} request")]
    NoResponse { request: &'static str },

    /// The reply variant does not match the one the sent request expects.
    #[error("host answered a {request} request with a {response} reply")]
    UnexpectedResponse {
        request: &'static str,
        response: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_reported_message_is_verbatim() {
        let err = PluginError::HostReported("sandbox violation".to_string());
        assert_eq!(err.to_string(), "sandbox violation");
    }

    #[test]
    fn test_mismatch_names_both_variants() {
        let err = ProtocolError::UnexpectedResponse {
            request: "build_operation",
            response: "test_operation",
        };
        let text = err.to_string();
        assert!(text.contains("build_operation"));
        assert!(text.contains("test_operation"));
    }
}
