use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{MANIFEST_DIR, MANIFEST_FILENAME, MANIFEST_PATH, MANIFEST_VERSION};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::generator::FileDigests;
use crate::ioutils::write_file_atomic;

/// Record of what a generation run produced.
///
/// Fields are declared in alphabetical order so the serialized document has
/// sorted keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub files: FileDigests,
    pub generated_at: DateTime<Utc>,
    pub manifest_version: u32,
    pub template: String,
}

impl Manifest {
    pub fn new<S: Into<String>>(template: S, files: FileDigests) -> Self {
        Self {
            files,
            generated_at: Utc::now(),
            manifest_version: MANIFEST_VERSION,
            template: template.into(),
        }
    }

    pub fn path<P: AsRef<Path>>(project_root: P) -> PathBuf {
        project_root.as_ref().join(MANIFEST_DIR).join(MANIFEST_FILENAME)
    }

    /// Serializes the manifest as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut serialized = serde_json::to_string_pretty(self)?;
        serialized.push('\n');
        Ok(serialized)
    }

    /// Writes the manifest into `project_root`, replacing any previous one in full.
    pub fn save<P: AsRef<Path>>(&self, project_root: P) -> Result<PathBuf> {
        let path = Self::path(&project_root);
        write_file_atomic(self.to_json()?.as_bytes(), &path)?;
        debug!("Manifest with {} files written to {}", self.files.len(), path.display());
        Ok(path)
    }

    /// Reads the manifest of the project at `project_root`.
    ///
    /// # Errors
    /// * `Error::ManifestNotFound` - the project has no manifest
    /// * `Error::ManifestInvalid` - the manifest cannot be parsed, has an
    ///   unsupported version or records a path outside the project
    pub fn load<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        let path = Self::path(&project_root);
        if !path.is_file() {
            return Err(Error::ManifestNotFound { path: path.display().to_string() });
        }

        let invalid = |reason: String| Error::ManifestInvalid {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(&path)?;
        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        if manifest.manifest_version != MANIFEST_VERSION {
            return Err(invalid(format!(
                "unsupported manifest version {}",
                manifest.manifest_version
            )));
        }

        for key in manifest.files.keys() {
            let normalized =
                Path::new(key).to_relative_posix().map_err(|e| invalid(e.to_string()))?;
            if normalized != *key || key == MANIFEST_PATH {
                return Err(invalid(format!("'{key}' is not a valid project path")));
            }
        }

        Ok(manifest)
    }
}

/// Persists the manifest for a finished generation run.
pub fn write_manifest<P: AsRef<Path>>(
    destination_root: P,
    template_name: &str,
    files: FileDigests,
) -> Result<PathBuf> {
    Manifest::new(template_name, files).save(destination_root)
}

/// Loads the manifest of a generated project.
pub fn read_manifest<P: AsRef<Path>>(project_root: P) -> Result<Manifest> {
    Manifest::load(project_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_files() -> FileDigests {
        let mut files = FileDigests::new();
        files.insert("src/main.py".into(), "b".repeat(64));
        files.insert("README.md".into(), "a".repeat(64));
        files
    }

    #[test]
    fn round_trips() {
        let project = TempDir::new().unwrap();

        let path = write_manifest(project.path(), "fullstack-app", sample_files()).unwrap();
        assert_eq!(path, project.path().join(".scaffold").join("manifest.json"));

        let manifest = read_manifest(project.path()).unwrap();
        assert_eq!(manifest.template, "fullstack-app");
        assert_eq!(manifest.files, sample_files());
        assert_eq!(manifest.manifest_version, 1);

        manifest.save(project.path()).unwrap();
        assert_eq!(read_manifest(project.path()).unwrap(), manifest);
    }

    #[test]
    fn serializes_with_sorted_keys() {
        let manifest = Manifest {
            files: sample_files(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            manifest_version: 1,
            template: "demo".into(),
        };

        let expected = format!(
            r#"{{
  "files": {{
    "README.md": "{}",
    "src/main.py": "{}"
  }},
  "generated_at": "2024-05-01T12:00:00Z",
  "manifest_version": 1,
  "template": "demo"
}}
"#,
            "a".repeat(64),
            "b".repeat(64)
        );
        assert_eq!(manifest.to_json().unwrap(), expected);
    }

    #[test]
    fn reads_offset_timestamps() {
        let project = TempDir::new().unwrap();
        let path = Manifest::path(project.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{
  "files": {"README.md": "abc"},
  "generated_at": "2024-05-01T12:00:00.123456+00:00",
  "manifest_version": 1,
  "template": "demo"
}"#,
        )
        .unwrap();

        let manifest = read_manifest(project.path()).unwrap();
        assert_eq!(manifest.files["README.md"], "abc");
    }

    #[test]
    fn missing_manifest() {
        let project = TempDir::new().unwrap();
        assert!(matches!(read_manifest(project.path()), Err(Error::ManifestNotFound { .. })));
    }

    #[test]
    fn corrupted_manifest() {
        let project = TempDir::new().unwrap();
        let path = Manifest::path(project.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read_manifest(project.path()), Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn rejects_paths_outside_the_project() {
        let project = TempDir::new().unwrap();
        let mut files = FileDigests::new();
        files.insert("../outside.txt".into(), "abc".into());
        Manifest::new("demo", files).save(project.path()).unwrap();

        assert!(matches!(read_manifest(project.path()), Err(Error::ManifestInvalid { .. })));
    }

    #[test]
    fn rejects_unknown_versions() {
        let project = TempDir::new().unwrap();
        let mut manifest = Manifest::new("demo", sample_files());
        manifest.manifest_version = 2;
        manifest.save(project.path()).unwrap();

        let err = read_manifest(project.path()).unwrap_err();
        assert!(matches!(err, Error::ManifestInvalid { reason, .. } if reason.contains("version")));
    }
}
