use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to walk directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Failed to parse ignore patterns. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Template '{name}' not found. Available templates: {}", .available.join(", "))]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("Templates directory not found: '{path}'.")]
    CatalogNotFound { path: String },

    /// A placeholder references an identifier the context does not define.
    #[error("Missing template variable: '{name}'.")]
    UndefinedVariable { name: String },

    #[error("File exists: '{path}'. Use --overwrite to replace.")]
    FileAlreadyExists { path: String },

    #[error("Manifest not found: '{path}'.")]
    ManifestNotFound { path: String },

    #[error("Manifest '{path}' is invalid: {reason}.")]
    ManifestInvalid { path: String, reason: String },

    #[error("Invalid --var '{spec}'. {reason}.")]
    InvalidVariableSpec { spec: String, reason: String },

    #[error("Rendered path '{path}' is not valid: {reason}.")]
    InvalidRenderedPath { path: String, reason: String },

    #[error("Config validation error: {0}.")]
    ConfigValidation(String),

    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
