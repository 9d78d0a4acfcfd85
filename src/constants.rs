//! Constants used throughout the scaffold application

/// Template config file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["scaffold.json", "scaffold.yaml", "scaffold.yml"];

/// Default suffix marking a file as a template
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".tmpl";

/// Patterns that are never copied from a template
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &["**/.DS_Store"];

/// Directory inside a generated project holding scaffold metadata
pub const MANIFEST_DIR: &str = ".scaffold";

/// Manifest file name inside [`MANIFEST_DIR`]
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// POSIX path of the manifest relative to the project root
pub const MANIFEST_PATH: &str = ".scaffold/manifest.json";

/// Current manifest format version
pub const MANIFEST_VERSION: u32 = 1;

/// Default values for the derived project fields
pub mod defaults {
    pub const TEMPLATE: &str = "fullstack-app";
    pub const TEMPLATES_DIR: &str = "templates";
    pub const OUTPUT_DIR: &str = ".";
    pub const DESCRIPTION: &str = "Full-stack app with Python backend and Next.js frontend.";
    pub const PYTHON_VERSION: &str = ">=3.11";
    pub const LICENSE: &str = "MIT";
    pub const SLUG: &str = "python-project";
    pub const PACKAGE_NAME: &str = "python_project";
    pub const PACKAGE_PREFIX: &str = "pkg_";
}

/// Environment variable overriding the templates directory
pub const TEMPLATES_DIR_ENV: &str = "SCAFFOLD_TEMPLATES_DIR";

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
