#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Plugin-side API for the kiln build tool.
//!
//! Kiln plugins run as separate sandboxed processes with no access to the
//! build engine, the package manifest model, or the filesystem outside
//! their sandbox. Privileged operations — building targets, running tests,
//! extracting symbol graphs — are requested from the host over the duplex
//! message channel the host binds at plugin startup.
//!
//! This crate is the typed surface for those requests: the domain value
//! types plugin code manipulates, the [`HostProxy`] that owns the blocking
//! request/reply round trip, and the [`MessageChannel`] abstraction with
//! the shipped [`FramedChannel`] pipe binding. Wire message types live in
//! `kiln-plugin-proto`.
//!
//! ```no_run
//! use kiln_plugin::{BuildParameters, BuildSubset, FramedChannel, HostProxy};
//!
//! let proxy = HostProxy::new(FramedChannel::over_stdio());
//! let result = proxy.build(
//!     BuildSubset::All { include_tests: false },
//!     BuildParameters::default(),
//! )?;
//! if !result.succeeded {
//!     eprintln!("{}", result.log_text);
//! }
//! # Ok::<(), kiln_plugin::PluginError>(())
//! ```

pub mod build;
pub mod channel;
pub mod convert;
pub mod error;
pub mod proxy;
pub mod symbol_graph;

pub use build::{
    ArtifactKind, BuildConfiguration, BuildLogVerbosity, BuildParameters, BuildResult,
    BuildSubset, BuiltArtifact,
};
pub use channel::{ChannelError, FramedChannel, MessageChannel};
pub use error::{PluginError, ProtocolError};
pub use proxy::HostProxy;
pub use symbol_graph::{AccessLevel, SymbolGraphOptions, SymbolGraphResult, Target};
pub use test::{
    Test, TestCase, TestOutcome, TestParameters, TestResult, TestSubset, TestTarget,
};
