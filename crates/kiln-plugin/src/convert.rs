//! Pure conversions between domain values and wire messages.
//!
//! One encode and one decode per entity, colocated. Every match over a
//! protocol enum is exhaustive with no wildcard arm: adding a variant on
//! either side must fail compilation here, not miscode silently. Request
//! payloads convert in both directions (the host decodes what the plugin
//! encodes); result payloads only decode, since they travel host→plugin.

use crate::build::{
    ArtifactKind, BuildConfiguration, BuildLogVerbosity, BuildParameters, BuildResult,
    BuildSubset, BuiltArtifact,
};
use crate::symbol_graph::{AccessLevel, SymbolGraphOptions, SymbolGraphResult};
use crate::test::{
    Test, TestCase, TestOutcome, TestParameters, TestResult, TestSubset, TestTarget,
};
use kiln_plugin_proto as wire;
use std::path::PathBuf;

#[must_use]
pub fn encode_build_subset(subset: BuildSubset) -> wire::BuildSubset {
    match subset {
        BuildSubset::All { include_tests } => wire::BuildSubset::All { include_tests },
        BuildSubset::Product(name) => wire::BuildSubset::Product { name },
        BuildSubset::Target(name) => wire::BuildSubset::Target { name },
    }
}

#[must_use]
pub fn decode_build_subset(subset: wire::BuildSubset) -> BuildSubset {
    match subset {
        wire::BuildSubset::All { include_tests } => BuildSubset::All { include_tests },
        wire::BuildSubset::Product { name } => BuildSubset::Product(name),
        wire::BuildSubset::Target { name } => BuildSubset::Target(name),
    }
}

fn encode_configuration(configuration: BuildConfiguration) -> wire::BuildConfiguration {
    match configuration {
        BuildConfiguration::Debug => wire::BuildConfiguration::Debug,
        BuildConfiguration::Release => wire::BuildConfiguration::Release,
    }
}

fn decode_configuration(configuration: wire::BuildConfiguration) -> BuildConfiguration {
    match configuration {
        wire::BuildConfiguration::Debug => BuildConfiguration::Debug,
        wire::BuildConfiguration::Release => BuildConfiguration::Release,
    }
}

fn encode_log_verbosity(verbosity: BuildLogVerbosity) -> wire::BuildLogVerbosity {
    match verbosity {
        BuildLogVerbosity::Concise => wire::BuildLogVerbosity::Concise,
        BuildLogVerbosity::Verbose => wire::BuildLogVerbosity::Verbose,
        BuildLogVerbosity::Debug => wire::BuildLogVerbosity::Debug,
    }
}

fn decode_log_verbosity(verbosity: wire::BuildLogVerbosity) -> BuildLogVerbosity {
    match verbosity {
        wire::BuildLogVerbosity::Concise => BuildLogVerbosity::Concise,
        wire::BuildLogVerbosity::Verbose => BuildLogVerbosity::Verbose,
        wire::BuildLogVerbosity::Debug => BuildLogVerbosity::Debug,
    }
}

#[must_use]
pub fn encode_build_parameters(parameters: BuildParameters) -> wire::BuildParameters {
    wire::BuildParameters {
        configuration: encode_configuration(parameters.configuration),
        log_verbosity: encode_log_verbosity(parameters.log_verbosity),
        c_flags: parameters.c_flags,
        cxx_flags: parameters.cxx_flags,
        compiler_flags: parameters.compiler_flags,
        linker_flags: parameters.linker_flags,
    }
}

#[must_use]
pub fn decode_build_parameters(parameters: wire::BuildParameters) -> BuildParameters {
    BuildParameters {
        configuration: decode_configuration(parameters.configuration),
        log_verbosity: decode_log_verbosity(parameters.log_verbosity),
        c_flags: parameters.c_flags,
        cxx_flags: parameters.cxx_flags,
        compiler_flags: parameters.compiler_flags,
        linker_flags: parameters.linker_flags,
    }
}

fn decode_artifact_kind(kind: wire::ArtifactKind) -> ArtifactKind {
    match kind {
        wire::ArtifactKind::Executable => ArtifactKind::Executable,
        wire::ArtifactKind::DynamicLibrary => ArtifactKind::DynamicLibrary,
        wire::ArtifactKind::StaticLibrary => ArtifactKind::StaticLibrary,
    }
}

fn decode_built_artifact(artifact: wire::BuiltArtifact) -> BuiltArtifact {
    BuiltArtifact {
        path: PathBuf::from(artifact.path),
        kind: decode_artifact_kind(artifact.kind),
    }
}

#[must_use]
pub fn decode_build_result(result: wire::BuildResult) -> BuildResult {
    BuildResult {
        succeeded: result.succeeded,
        log_text: result.log_text,
        built_artifacts: result
            .built_artifacts
            .into_iter()
            .map(decode_built_artifact)
            .collect(),
    }
}

#[must_use]
pub fn encode_test_subset(subset: TestSubset) -> wire::TestSubset {
    match subset {
        TestSubset::All => wire::TestSubset::All,
        TestSubset::Filtered(patterns) => wire::TestSubset::Filtered { patterns },
    }
}

#[must_use]
pub fn decode_test_subset(subset: wire::TestSubset) -> TestSubset {
    match subset {
        wire::TestSubset::All => TestSubset::All,
        wire::TestSubset::Filtered { patterns } => TestSubset::Filtered(patterns),
    }
}

#[must_use]
pub fn encode_test_parameters(parameters: TestParameters) -> wire::TestParameters {
    wire::TestParameters {
        enable_code_coverage: parameters.enable_code_coverage,
    }
}

#[must_use]
pub fn decode_test_parameters(parameters: wire::TestParameters) -> TestParameters {
    TestParameters {
        enable_code_coverage: parameters.enable_code_coverage,
    }
}

fn decode_test_outcome(outcome: wire::TestOutcome) -> TestOutcome {
    match outcome {
        wire::TestOutcome::Succeeded => TestOutcome::Succeeded,
        wire::TestOutcome::Skipped => TestOutcome::Skipped,
        wire::TestOutcome::Failed => TestOutcome::Failed,
    }
}

fn decode_test(test: wire::Test) -> Test {
    Test {
        name: test.name,
        result: decode_test_outcome(test.result),
        duration: test.duration,
    }
}

fn decode_test_case(case: wire::TestCase) -> TestCase {
    TestCase {
        name: case.name,
        tests: case.tests.into_iter().map(decode_test).collect(),
    }
}

fn decode_test_target(target: wire::TestTarget) -> TestTarget {
    TestTarget {
        name: target.name,
        test_cases: target.test_cases.into_iter().map(decode_test_case).collect(),
    }
}

#[must_use]
pub fn decode_test_result(result: wire::TestResult) -> TestResult {
    TestResult {
        succeeded: result.succeeded,
        test_targets: result
            .test_targets
            .into_iter()
            .map(decode_test_target)
            .collect(),
        code_coverage_data_file: result.code_coverage_data_file.map(PathBuf::from),
    }
}

fn encode_access_level(level: AccessLevel) -> wire::AccessLevel {
    match level {
        AccessLevel::Private => wire::AccessLevel::Private,
        AccessLevel::FilePrivate => wire::AccessLevel::FilePrivate,
        AccessLevel::Internal => wire::AccessLevel::Internal,
        AccessLevel::Public => wire::AccessLevel::Public,
        AccessLevel::Open => wire::AccessLevel::Open,
    }
}

fn decode_access_level(level: wire::AccessLevel) -> AccessLevel {
    match level {
        wire::AccessLevel::Private => AccessLevel::Private,
        wire::AccessLevel::FilePrivate => AccessLevel::FilePrivate,
        wire::AccessLevel::Internal => AccessLevel::Internal,
        wire::AccessLevel::Public => AccessLevel::Public,
        wire::AccessLevel::Open => AccessLevel::Open,
    }
}

#[must_use]
pub fn encode_symbol_graph_options(options: SymbolGraphOptions) -> wire::SymbolGraphOptions {
    wire::SymbolGraphOptions {
        minimum_access_level: encode_access_level(options.minimum_access_level),
        include_synthesized: options.include_synthesized,
        include_spi: options.include_spi,
    }
}

#[must_use]
pub fn decode_symbol_graph_options(options: wire::SymbolGraphOptions) -> SymbolGraphOptions {
    SymbolGraphOptions {
        minimum_access_level: decode_access_level(options.minimum_access_level),
        include_synthesized: options.include_synthesized,
        include_spi: options.include_spi,
    }
}

#[must_use]
pub fn decode_symbol_graph_result(result: wire::SymbolGraphResult) -> SymbolGraphResult {
    SymbolGraphResult {
        directory_path: PathBuf::from(result.directory_path),
    }
}
