/// Handles argument parsing and command dispatch.
pub mod cli;

/// Per-template configuration files.
pub mod config;

pub mod constants;

/// Variable context and derived project fields.
pub mod context;

/// Content digests of generated files.
pub mod digest;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// Two-pass project generation.
pub mod generator;

/// Glob patterns excluding template entries from generation.
pub mod ignore;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// The template catalog.
pub mod loader;

/// The manifest recorded inside every generated project.
pub mod manifest;

/// Operations exposed to callers such as the CLI.
pub mod project;

/// Placeholder substitution for paths and file bodies.
pub mod renderer;

/// Drift detection against the manifest.
pub mod status;

/// Per-entry template processing.
pub mod template;
