//! Drift detection for generated projects.
//!
//! Every file of a project falls into exactly one class: generated and
//! unchanged, generated and modified, generated and deleted, or custom. The
//! classification uses nothing but the manifest and the live filesystem.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::MANIFEST_PATH;
use crate::digest::digest_file;
use crate::error::Result;
use crate::ext::PathExt;
use crate::manifest::Manifest;

/// Classification of a project's files relative to its manifest.
///
/// Every list is sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub template: String,
    pub generated_at: DateTime<Utc>,
    pub unchanged: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
    pub custom: Vec<String>,
}

impl StatusReport {
    /// True when the project holds exactly what was generated.
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.deleted.is_empty() && self.custom.is_empty()
    }
}

/// Analyzes the project at `project_root` against its manifest.
///
/// # Errors
/// * `Error::ManifestNotFound` - the project was not generated by scaffold
pub fn status<P: AsRef<Path>>(project_root: P) -> Result<StatusReport> {
    let project_root = project_root.as_ref();
    let manifest = Manifest::load(project_root)?;

    let mut unchanged = Vec::new();
    let mut modified = Vec::new();
    let mut deleted = Vec::new();

    // BTreeMap iteration keeps every class sorted.
    for (relative, expected) in &manifest.files {
        let path = project_root.join(relative);
        if !path.is_file() {
            debug!("{relative}: deleted");
            deleted.push(relative.clone());
        } else if digest_file(&path)? == *expected {
            unchanged.push(relative.clone());
        } else {
            debug!("{relative}: modified");
            modified.push(relative.clone());
        }
    }

    let files = project_files(project_root)?;
    let mut custom: Vec<String> = files
        .tracked
        .into_iter()
        .filter(|relative| relative != MANIFEST_PATH && !manifest.files.contains_key(relative))
        .chain(files.unnamed)
        .collect();
    custom.sort();

    Ok(StatusReport {
        template: manifest.template,
        generated_at: manifest.generated_at,
        unchanged,
        modified,
        deleted,
        custom,
    })
}

/// Files below a project root as POSIX relative paths.
struct ProjectFiles {
    /// Paths that can be compared against manifest keys.
    tracked: BTreeSet<String>,
    /// Paths with non UTF-8 names, rendered lossily. The generator never
    /// writes such names, so they are always custom.
    unnamed: Vec<String>,
}

fn project_files(project_root: &Path) -> Result<ProjectFiles> {
    let mut files = ProjectFiles { tracked: BTreeSet::new(), unnamed: Vec::new() };

    for dir_entry in WalkDir::new(project_root).min_depth(1) {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(project_root) else {
            continue;
        };
        match relative.to_relative_posix() {
            Ok(relative) => {
                files.tracked.insert(relative);
            }
            Err(_) => {
                let lossy = lossy_posix(relative);
                debug!("{lossy}: non UTF-8 name, reported as custom");
                files.unnamed.push(lossy);
            }
        }
    }

    Ok(files)
}

fn lossy_posix(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
