//! Per-template configuration
//!
//! A template may carry a `scaffold.json`, `scaffold.yaml` or `scaffold.yml`
//! file at its root. Every field is optional.

pub mod loader;


pub use loader::TemplateConfig;
