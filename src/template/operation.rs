use std::path::PathBuf;

/// What generation does with a single template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOperation {
    /// Write rendered `content` to `target`. `relative` is the POSIX path of
    /// `target` below the output root and is the key recorded in the manifest.
    Write {
        source: PathBuf,
        relative: String,
        target: PathBuf,
        content: String,
        target_exists: bool,
    },
    CreateDirectory {
        relative: String,
        target: PathBuf,
        target_exists: bool,
    },
    Ignore {
        source: PathBuf,
    },
}

impl TemplateOperation {
    /// Returns the target path for this operation, used for error context.
    ///
    /// # Returns
    /// * `Option<&PathBuf>` - The target path, or None for ignored entries
    pub fn target_path(&self) -> Option<&PathBuf> {
        match self {
            TemplateOperation::Write { target, .. } => Some(target),
            TemplateOperation::CreateDirectory { target, .. } => Some(target),
            TemplateOperation::Ignore { .. } => None,
        }
    }

    /// Gets a message describing the operation and its status.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    ///
    /// # Returns
    /// * `String` - A descriptive message about the operation
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            TemplateOperation::Write { target, target_exists, .. } => {
                if *target_exists {
                    format!(
                        "{}Writing to '{}' (overwriting existing file)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }

            TemplateOperation::CreateDirectory { target, target_exists, .. } => {
                if *target_exists {
                    format!(
                        "{}Skipping directory creation '{}' (already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Creating directory '{}'", prefix, target.display())
                }
            }

            TemplateOperation::Ignore { source } => {
                format!("{}Ignoring '{}' (matches ignore pattern)", prefix, source.display())
            }
        }
    }
}
