//! Configuration loading and management

use crate::constants::{CONFIG_FILENAMES, DEFAULT_TEMPLATE_SUFFIX};
use crate::context::is_identifier;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Optional settings a template ships next to its files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateConfig {
    /// Human readable summary shown when listing templates.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "get_default_template_suffix")]
    pub template_suffix: String,
    /// Extra glob patterns, relative to the template root, that are never copied.
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Default variable values. Derived fields and `--var` values take precedence.
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            description: None,
            template_suffix: get_default_template_suffix(),
            ignore: Vec::new(),
            variables: IndexMap::new(),
        }
    }
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.template_suffix.is_empty() {
            return Err(Error::ConfigValidation("template_suffix must not be empty".into()));
        }
        if !self.template_suffix.starts_with('.') || self.template_suffix.len() < 2 {
            return Err(Error::ConfigValidation(
                "template_suffix must start with '.' and have at least 1 character after it"
                    .into(),
            ));
        }
        if let Some(key) = self.variables.keys().find(|key| !is_identifier(key)) {
            return Err(Error::ConfigValidation(format!(
                "variable '{key}' must match [A-Za-z_][A-Za-z0-9_]*"
            )));
        }
        Ok(())
    }

    /// Loads the config of the template at `template_root`.
    ///
    /// The first existing file out of [`CONFIG_FILENAMES`] wins. A template
    /// without a config file gets the defaults.
    pub fn load_config<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = template_root.join(config_file_name);

            if config_file_path.is_file() {
                debug!("Loading template config from {}", config_file_path.display());
                let content = std::fs::read_to_string(&config_file_path)?;
                let config: TemplateConfig = if config_file_name.ends_with(".json") {
                    serde_json::from_str(&content)?
                } else {
                    serde_yaml::from_str(&content)?
                };
                config.validate()?;
                return Ok(config);
            }
        }

        debug!("No config file in {}, using defaults", template_root.display());
        Ok(Self::default())
    }
}

fn get_default_template_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}
