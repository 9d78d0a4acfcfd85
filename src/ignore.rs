use crate::config::TemplateConfig;
use crate::constants::{CONFIG_FILENAMES, DEFAULT_IGNORE_PATTERNS};
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Builds the set of glob patterns whose matches are left out of generation.
///
/// Patterns are matched against paths relative to the template root. The set
/// always holds the platform noise defaults and the template config files,
/// followed by the template's own `ignore` patterns.
pub fn build_ignore_set(config: &TemplateConfig) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    let patterns = DEFAULT_IGNORE_PATTERNS
        .iter()
        .chain(CONFIG_FILENAMES.iter())
        .copied()
        .chain(config.ignore.iter().map(String::as_str))
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty() && !pattern.starts_with('#'));

    for pattern in patterns {
        debug!("Adding ignore pattern: {pattern} to globset");
        builder.add(Glob::new(pattern)?);
    }

    Ok(builder.build()?)
}
