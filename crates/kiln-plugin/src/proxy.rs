//! The callable surface plugins use to reach the host.
//!
//! Each operation is one blocking round trip: encode the domain call,
//! send it, wait for the single reply, decode or fail. There is no retry,
//! no timeout, and no pipelining here; supervision of a wedged host
//! belongs to the process layer above.

use crate::build::{BuildParameters, BuildResult, BuildSubset};
use crate::channel::{ChannelError, MessageChannel};
use crate::convert;
use crate::error::{PluginError, ProtocolError};
use crate::symbol_graph::{SymbolGraphOptions, SymbolGraphResult, Target};
use crate::test::{TestParameters, TestResult, TestSubset};
use kiln_plugin_proto as wire;
use std::io;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Ties a request type to the single reply variant that may answer it.
///
/// The wire protocol has no request-correlation id, so this association is
/// the only thing standing between a reply and the wrong decoder; keeping
/// it in the type system means a new operation cannot be added without
/// stating which reply it expects.
trait HostCall {
    type Output;

    fn into_message(self) -> wire::Request;

    /// Extract the expected reply payload, or hand the reply back if it is
    /// the wrong variant.
    fn decode_reply(reply: wire::Response) -> Result<Self::Output, wire::Response>;
}

struct BuildCall {
    subset: BuildSubset,
    parameters: BuildParameters,
}

impl HostCall for BuildCall {
    type Output = BuildResult;

    fn into_message(self) -> wire::Request {
        wire::Request::BuildOperation {
            subset: convert::encode_build_subset(self.subset),
            parameters: convert::encode_build_parameters(self.parameters),
        }
    }

    fn decode_reply(reply: wire::Response) -> Result<BuildResult, wire::Response> {
        match reply {
            wire::Response::BuildOperation { result } => Ok(convert::decode_build_result(result)),
            other => Err(other),
        }
    }
}

struct TestCall {
    subset: TestSubset,
    parameters: TestParameters,
}

impl HostCall for TestCall {
    type Output = TestResult;

    fn into_message(self) -> wire::Request {
        wire::Request::TestOperation {
            subset: convert::encode_test_subset(self.subset),
            parameters: convert::encode_test_parameters(self.parameters),
        }
    }

    fn decode_reply(reply: wire::Response) -> Result<TestResult, wire::Response> {
        match reply {
            wire::Response::TestOperation { result } => Ok(convert::decode_test_result(result)),
            other => Err(other),
        }
    }
}

struct SymbolGraphCall {
    target_name: String,
    options: SymbolGraphOptions,
}

impl HostCall for SymbolGraphCall {
    type Output = SymbolGraphResult;

    fn into_message(self) -> wire::Request {
        wire::Request::SymbolGraph {
            target_name: self.target_name,
            options: convert::encode_symbol_graph_options(self.options),
        }
    }

    fn decode_reply(reply: wire::Response) -> Result<SymbolGraphResult, wire::Response> {
        match reply {
            wire::Response::SymbolGraph { result } => {
                Ok(convert::decode_symbol_graph_result(result))
            }
            other => Err(other),
        }
    }
}

/// Proxy for the host side of the plugin channel.
///
/// Calls are strictly sequential: the channel is held under a mutex for
/// the whole send/receive window, so calls issued from multiple plugin
/// threads cannot interleave and corrupt the positional reply pairing.
#[derive(Debug)]
pub struct HostProxy<C> {
    channel: Mutex<C>,
}

impl<C: MessageChannel> HostProxy<C> {
    #[must_use]
    pub fn new(channel: C) -> Self {
        Self {
            channel: Mutex::new(channel),
        }
    }

    /// Ask the host to build the given subset of the package.
    ///
    /// A build that runs and fails is an `Ok` result with
    /// `succeeded: false`; `Err` means the round trip itself broke.
    ///
    /// # Errors
    /// [`PluginError::Channel`] on transport failure,
    /// [`PluginError::Protocol`] on a missing or mismatched reply,
    /// [`PluginError::HostReported`] when the host declines the request.
    pub fn build(
        &self,
        subset: BuildSubset,
        parameters: BuildParameters,
    ) -> Result<BuildResult, PluginError> {
        self.round_trip(BuildCall { subset, parameters })
    }

    /// Ask the host to run the given subset of the package's tests.
    ///
    /// Failing tests come back as an `Ok` result with `succeeded: false`.
    ///
    /// # Errors
    /// Same taxonomy as [`HostProxy::build`].
    pub fn test(
        &self,
        subset: TestSubset,
        parameters: TestParameters,
    ) -> Result<TestResult, PluginError> {
        self.round_trip(TestCall { subset, parameters })
    }

    /// Ask the host to extract the symbol graph for a target.
    ///
    /// Only the target's name travels; the target itself stays owned by
    /// the host's package model.
    ///
    /// # Errors
    /// Same taxonomy as [`HostProxy::build`].
    pub fn symbol_graph(
        &self,
        target: &Target,
        options: SymbolGraphOptions,
    ) -> Result<SymbolGraphResult, PluginError> {
        self.round_trip(SymbolGraphCall {
            target_name: target.name.clone(),
            options,
        })
    }

    fn round_trip<Call: HostCall>(&self, call: Call) -> Result<Call::Output, PluginError> {
        let message = call.into_message();
        let request = message.variant_name();

        // Held across send and receive: replies carry no correlation id,
        // so at most one request may be outstanding on the channel.
        let mut channel = self.channel.lock().map_err(|_| {
            ChannelError::Io(io::Error::new(
                io::ErrorKind::Other,
                "plugin channel lock poisoned",
            ))
        })?;

        debug!(request, "sending host request");
        channel.send_message(&message)?;

        let Some(reply) = channel.wait_for_next_message()? else {
            warn!(request, "host closed the channel without replying");
            return Err(ProtocolError::NoResponse { request }.into());
        };
        drop(channel);

        debug!(request, reply = reply.variant_name(), "received host reply");

        if let wire::Response::Error { message } = reply {
            return Err(PluginError::HostReported(message));
        }

        match Call::decode_reply(reply) {
            Ok(output) => Ok(output),
            Err(other) => {
                let response = other.variant_name();
                warn!(request, response, "mismatched reply variant");
                Err(ProtocolError::UnexpectedResponse { request, response }.into())
            }
        }
    }
}
