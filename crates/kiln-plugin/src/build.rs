//! Domain types for build operations.
//!
//! These are plain owner-side values; the wire representation lives in
//! `kiln-plugin-proto` and conversion happens in the translation layer.

use std::path::PathBuf;

/// Which part of the package to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSubset {
    /// Everything in the package.
    All {
        /// Also build test targets.
        include_tests: bool,
    },
    /// A single named product.
    Product(String),
    /// A single named target.
    Target(String),
}

/// Build configuration to compile with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildConfiguration {
    #[default]
    Debug,
    Release,
}

/// How much build log output the host should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildLogVerbosity {
    #[default]
    Concise,
    Verbose,
    Debug,
}

/// Parameters for a build request.
///
/// The default is a concise debug build with no extra tool flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
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
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Executable,
    DynamicLibrary,
    StaticLibrary,
}

/// One artifact produced by a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArtifact {
    /// Path in the host's view of the filesystem. Opaque to the plugin:
    /// it need not resolve inside the plugin sandbox.
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

/// Result of a completed build operation.
///
/// A build that ran and failed is a normal result with `succeeded: false`;
/// only a broken round trip is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub succeeded: bool,
    /// Verbatim build log. May be empty.
    pub log_text: String,
    /// Artifacts in the order the host produced them.
    pub built_artifacts: Vec<BuiltArtifact>,
}
