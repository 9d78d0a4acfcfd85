use globset::GlobSet;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{MANIFEST_DIR, MANIFEST_PATH};
use crate::context::Variables;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::TemplateRenderer;

use super::operation::TemplateOperation;

/// Turns single template entries into [`TemplateOperation`]s without touching
/// the output tree.
pub struct TemplateProcessor<'a> {
    /// Dependencies
    engine: &'a dyn TemplateRenderer,
    ignore: &'a GlobSet,

    /// Other
    template_root: &'a Path,
    output_root: &'a Path,
    variables: &'a Variables,
    template_suffix: &'a str,
}

impl<'a> TemplateProcessor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        ignore: &'a GlobSet,
        template_root: &'a Path,
        output_root: &'a Path,
        variables: &'a Variables,
        template_suffix: &'a str,
    ) -> Self {
        Self { engine, ignore, template_root, output_root, variables, template_suffix }
    }

    /// Returns the path of `template_entry` relative to the template root.
    fn relative_entry<'p>(&self, template_entry: &'p Path) -> Result<&'p Path> {
        template_entry.strip_prefix(self.template_root).map_err(|e| Error::ProcessError {
            source_path: template_entry.display().to_string(),
            e: e.to_string(),
        })
    }

    /// Checks whether `template_entry` matches one of the ignore patterns.
    pub fn is_ignored(&self, template_entry: &Path) -> bool {
        let ignored = self
            .relative_entry(template_entry)
            .map(|relative| self.ignore.is_match(relative))
            .unwrap_or(false);
        if ignored {
            debug!("Skipping {} (matches ignore pattern)", template_entry.display());
        }
        ignored
    }

    /// Checks if the file name carries the template suffix, e.g. `README.md.tmpl`.
    ///
    /// A file named exactly like the suffix is a dotfile, not a template.
    fn is_template_file(&self, relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        file_name.len() > self.template_suffix.len() && file_name.ends_with(self.template_suffix)
    }

    /// Removes the template suffix from a rendered relative path.
    fn remove_template_suffix(&self, relative: String) -> String {
        if self.is_template_file(&relative) {
            relative[..relative.len() - self.template_suffix.len()].to_string()
        } else {
            relative
        }
    }

    /// Renders the entry path and normalizes it to a POSIX path below the output root.
    ///
    /// # Errors
    /// * `Error::UndefinedVariable` - the path references an unknown variable
    /// * `Error::InvalidRenderedPath` - the rendered path is empty, absolute,
    ///   escapes the output root or collides with the manifest
    fn render_relative_path(&self, relative_entry: &Path, is_file: bool) -> Result<String> {
        let rendered = self.engine.render_path(relative_entry, self.variables)?;
        let mut relative = Path::new(&rendered).to_relative_posix()?;
        if is_file {
            relative = self.remove_template_suffix(relative);
        }

        let reserved = relative == MANIFEST_PATH
            || relative.starts_with(&format!("{MANIFEST_PATH}/"))
            || (is_file && relative == MANIFEST_DIR);
        if reserved {
            return Err(Error::InvalidRenderedPath {
                path: relative,
                reason: "the path is reserved for the scaffold manifest".to_string(),
            });
        }

        Ok(relative)
    }

    /// Reads a template file as UTF-8 text.
    fn read_template(&self, template_entry: &Path) -> Result<String> {
        fs::read_to_string(template_entry).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => Error::ProcessError {
                source_path: template_entry.display().to_string(),
                e: "template files must be valid UTF-8".to_string(),
            },
            _ => Error::IoError(e),
        })
    }

    /// Processes a template entry and determines the appropriate operation.
    ///
    /// # Arguments
    /// * `template_entry` - The template entry to process, below the template root
    ///
    /// # Returns
    /// * `Result<TemplateOperation>` - The operation to perform
    pub fn process(&self, template_entry: &Path) -> Result<TemplateOperation> {
        let template_entry: PathBuf = template_entry.to_path_buf();

        if self.is_ignored(&template_entry) {
            return Ok(TemplateOperation::Ignore { source: template_entry });
        }

        let relative_entry = self.relative_entry(&template_entry)?;
        debug!("Processing source entry: {}", relative_entry.display());

        let is_file = !template_entry.is_dir();
        let relative = self.render_relative_path(relative_entry, is_file)?;
        let target = self.output_root.join(&relative);
        debug!("Processed target entry: {relative}");

        if is_file {
            let template_content = self.read_template(&template_entry)?;
            let content = self.engine.render(&template_content, self.variables)?;
            let target_exists = target.exists();

            Ok(TemplateOperation::Write {
                source: template_entry,
                relative,
                target,
                content,
                target_exists,
            })
        } else {
            let target_exists = target.is_dir();
            Ok(TemplateOperation::CreateDirectory { relative, target, target_exists })
        }
    }
}
