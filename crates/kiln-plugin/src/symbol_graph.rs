//! Domain types for symbol graph extraction.

use std::path::PathBuf;

/// Symbol access levels, ordered narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AccessLevel {
    Private,
    FilePrivate,
    Internal,
    #[default]
    Public,
    Open,
}

/// Options for symbol graph extraction.
///
/// The default covers `public` and wider, without synthesized or SPI
/// symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SymbolGraphOptions {
    /// Include symbols at this access level and wider.
    pub minimum_access_level: AccessLevel,
    /// Include synthesized members.
    pub include_synthesized: bool,
    /// Include symbols marked as SPI.
    pub include_spi: bool,
}

/// Result of symbol graph extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGraphResult {
    /// Host-resolved directory holding the emitted symbol graph files.
    pub directory_path: PathBuf,
}

/// A target in the host's package model.
///
/// Plugins receive targets by name from the host. The proxy reads the name
/// to address a request; it never mutates or retains target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
}
