#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Wire protocol types for kiln host/plugin communication.
//!
//! This crate defines the closed set of request and response messages a
//! sandboxed plugin process exchanges with the kiln host over its inherited
//! pipe pair. The plugin sends [`Request`] values and blocks for a single
//! [`Response`]; there is no pipelining and no request correlation id, so
//! reply pairing is purely positional.
//!
//! ## Wire format
//! Messages use length-prefixed JSON:
//! - 4-byte little-endian u32 length prefix
//! - JSON payload bytes
//!
//! Paths in these types are opaque strings resolved in the host's view of
//! the filesystem; plugins must not assume they resolve inside the plugin
//! sandbox.

use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Protocol schema version. Bump when changing message format.
pub const PROTO_SCHEMA_VERSION: u32 = 1;

/// Which part of the package a build request covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildSubset {
    /// Everything in the package.
    All {
        /// Also build test targets.
        include_tests: bool,
    },
    /// A single named product.
    Product { name: String },
    /// A single named target.
    Target { name: String },
}

/// Build configuration to compile with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfiguration {
    Debug,
    Release,
}

/// How much build log output the host should produce.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildLogVerbosity {
    Concise,
    Verbose,
    Debug,
}

/// Parameters for a build operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildParameters {
    pub configuration: BuildConfiguration,
    pub log_verbosity: BuildLogVerbosity,
    /// Additional flags for the C compiler, in order.
    pub c_flags: Vec<String>,
    /// Additional flags for the C++ compiler, in order.
    pub cxx_flags: Vec<String>,
    /// Additional flags for the language compiler, in order.
    pub compiler_flags: Vec<String>,
    /// Additional flags for the linker, in order.
    pub linker_flags: Vec<String>,
}

/// Kind of artifact a build produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Executable,
    DynamicLibrary,
    StaticLibrary,
}

/// One artifact produced by a build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuiltArtifact {
    /// Host-resolved path to the artifact.
    pub path: String,
    pub kind: ArtifactKind,
}

/// Result of a build operation.
///
/// A failed build is still a well-formed result (`succeeded: false`), not a
/// protocol error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildResult {
    pub succeeded: bool,
    /// Verbatim build log. May be empty.
    pub log_text: String,
    /// Artifacts in the order the host produced them.
    pub built_artifacts: Vec<BuiltArtifact>,
}

/// Which tests a test request covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestSubset {
    /// All tests in the package.
    All,
    /// Tests matching the given patterns.
    ///
    /// Patterns use `<target>.<case>` or `<target>.<case>/<test>` syntax and
    /// are interpreted by the host; the protocol treats them as opaque.
    Filtered { patterns: Vec<String> },
}

/// Parameters for a test operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestParameters {
    pub enable_code_coverage: bool,
}

/// Outcome of a single test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
    Succeeded,
    Skipped,
    Failed,
}

/// One executed test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Test {
    pub name: String,
    pub result: TestOutcome,
    /// Wall-clock duration in seconds. Non-negative.
    pub duration: f64,
}

/// One test case and the tests it ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub tests: Vec<Test>,
}

/// One test target and the cases it ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestTarget {
    pub name: String,
    pub test_cases: Vec<TestCase>,
}

/// Result of a test operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub succeeded: bool,
    pub test_targets: Vec<TestTarget>,
    /// Host-resolved path to the coverage data file, present only when
    /// coverage was enabled and the host produced one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub code_coverage_data_file: Option<String>,
}

/// Symbol access levels, narrowest to widest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Private,
    FilePrivate,
    Internal,
    Public,
    Open,
}

/// Options for symbol graph extraction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolGraphOptions {
    /// Include symbols at this access level and wider.
    pub minimum_access_level: AccessLevel,
    /// Include synthesized members.
    pub include_synthesized: bool,
    /// Include symbols marked as SPI.
    pub include_spi: bool,
}

/// Result of symbol graph extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolGraphResult {
    /// Host-resolved directory containing the emitted symbol graph files.
    pub directory_path: String,
}

/// A request from plugin to host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Build the given subset of the package.
    BuildOperation {
        subset: BuildSubset,
        parameters: BuildParameters,
    },

    /// Run the given subset of the package's tests.
    TestOperation {
        subset: TestSubset,
        parameters: TestParameters,
    },

    /// Extract the symbol graph for a target.
    SymbolGraph {
        /// Name of the target in the host's package model.
        target_name: String,
        options: SymbolGraphOptions,
    },
}

impl Request {
    /// Stable wire name of this variant, for diagnostics.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::BuildOperation { .. } => "build_operation",
            Self::TestOperation { .. } => "test_operation",
            Self::SymbolGraph { .. } => "symbol_graph",
        }
    }
}

/// A response from host to plugin.
///
/// Each request variant has exactly one success variant here; `Error` may
/// answer any request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Successful answer to a build operation.
    BuildOperation { result: BuildResult },

    /// Successful answer to a test operation.
    TestOperation { result: TestResult },

    /// Successful answer to a symbol graph request.
    SymbolGraph { result: SymbolGraphResult },

    /// The host declined or failed the request.
    Error { message: String },

    /// A variant this build of the protocol does not know.
    ///
    /// A newer host may answer with a message tag introduced after this
    /// crate was compiled; decoding it here keeps version skew reportable
    /// as a mismatched reply instead of a framing failure.
    #[serde(other)]
    Unknown,
}

impl Response {
    /// Stable wire name of this variant, for diagnostics.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::BuildOperation { .. } => "build_operation",
            Self::TestOperation { .. } => "test_operation",
            Self::SymbolGraph { .. } => "symbol_graph",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Maximum frame size for sanity checking (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Encode a message to bytes with length prefix.
///
/// Format: 4-byte little-endian length + JSON bytes
///
/// # Errors
/// Returns an error if serialization fails or the payload exceeds
/// [`MAX_FRAME_SIZE`].
pub fn encode_frame<T: Serialize>(message: &T) -> io::Result<Vec<u8>> {
    let json =
        serde_json::to_vec(message).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if json.len() > MAX_FRAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame too large: {} bytes", json.len()),
        ));
    }

    // Cast is safe: MAX_FRAME_SIZE fits in u32
    #[allow(clippy::cast_possible_truncation)]
    let len = json.len() as u32;

    let mut buf = Vec::with_capacity(4 + json.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(&json);

    Ok(buf)
}

/// Decode a message from payload bytes (without length prefix).
///
/// # Errors
/// Returns an error if deserialization fails.
pub fn decode_frame<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> io::Result<T> {
    serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a length-prefixed message to a writer.
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> io::Result<()> {
    let encoded = encode_frame(message)?;
    writer.write_all(&encoded)?;
    writer.flush()
}

/// Read a length-prefixed message from a reader.
///
/// # Errors
/// Returns an error if reading fails, the frame is oversized, or the
/// payload does not decode.
pub fn read_frame<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> io::Result<T> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_FRAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame too large: {len} bytes"),
        ));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    decode_frame(&buf)
}
