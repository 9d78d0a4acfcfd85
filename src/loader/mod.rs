//! Template catalog: a directory whose subdirectories are templates.

use crate::config::TemplateConfig;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::path::{Component, Path, PathBuf};

/// A template found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub path: PathBuf,
    pub description: Option<String>,
}

/// Loader for templates stored under a local catalog directory.
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    /// Creates a new catalog rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns the names of every template in the catalog, sorted.
    ///
    /// Only directories count as templates.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(Error::CatalogNotFound { path: self.root.display().to_string() });
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("Skipping template with non UTF-8 name: {name:?}"),
            }
        }
        names.sort();

        Ok(names)
    }

    /// Returns every template along with the description from its config.
    ///
    /// A template whose config cannot be loaded is still listed, without a
    /// description.
    pub fn entries(&self) -> Result<Vec<TemplateEntry>> {
        let entries = self
            .list()?
            .into_iter()
            .map(|name| {
                let path = self.root.join(&name);
                let description = match TemplateConfig::load_config(&path) {
                    Ok(config) => config.description,
                    Err(e) => {
                        warn!("Ignoring config of template '{name}': {e}");
                        None
                    }
                };
                TemplateEntry { name, path, description }
            })
            .collect();
        Ok(entries)
    }

    /// Resolves `name` to the template directory.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` - listing the available templates, when
    ///   `name` is not a directory in the catalog or is not a plain name.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if is_plain_name(name) && path.is_dir() {
            debug!("Resolved template '{name}' to {}", path.display());
            return Ok(path);
        }

        Err(Error::TemplateNotFound {
            name: name.to_string(),
            available: self.list().unwrap_or_default(),
        })
    }
}

/// A template name must be exactly one normal path component.
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn catalog_with(names: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for name in names {
            fs::create_dir_all(root.path().join(name)).unwrap();
        }
        root
    }

    #[test]
    fn lists_directories_sorted() {
        let root = catalog_with(&["web", "cli", "api"]);
        fs::write(root.path().join("README.md"), "not a template").unwrap();

        let catalog = TemplateCatalog::new(root.path());
        assert_eq!(catalog.list().unwrap(), vec!["api", "cli", "web"]);
    }

    #[test]
    fn missing_catalog_is_an_error() {
        let root = TempDir::new().unwrap();
        let catalog = TemplateCatalog::new(root.path().join("absent"));
        assert!(matches!(catalog.list(), Err(Error::CatalogNotFound { .. })));
    }

    #[test]
    fn resolves_existing_template() {
        let root = catalog_with(&["cli"]);
        let catalog = TemplateCatalog::new(root.path());
        assert_eq!(catalog.resolve("cli").unwrap(), root.path().join("cli"));
    }

    #[test]
    fn unknown_template_lists_siblings() {
        let root = catalog_with(&["web", "cli"]);
        let catalog = TemplateCatalog::new(root.path());

        match catalog.resolve("desktop").unwrap_err() {
            Error::TemplateNotFound { name, available } => {
                assert_eq!(name, "desktop");
                assert_eq!(available, vec!["cli", "web"]);
            }
            other => panic!("Expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn rejects_names_that_are_not_plain() {
        let root = catalog_with(&["cli/nested"]);
        let catalog = TemplateCatalog::new(root.path().join("cli"));

        for name in ["..", "../cli", "nested/..", "", ".", "/tmp"] {
            assert!(
                matches!(catalog.resolve(name), Err(Error::TemplateNotFound { .. })),
                "expected '{name}' to be rejected"
            );
        }
        assert!(catalog.resolve("nested").is_ok());
    }

    #[test]
    fn entries_carry_descriptions() {
        let root = catalog_with(&["api", "cli"]);
        fs::write(root.path().join("api").join("scaffold.yml"), "description: HTTP API\n")
            .unwrap();

        let entries = TemplateCatalog::new(root.path()).entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description.as_deref(), Some("HTTP API"));
        assert_eq!(entries[1].description, None);
    }

    #[test]
    fn broken_config_keeps_template_listed() {
        let root = catalog_with(&["bad", "good"]);
        fs::write(root.path().join("bad").join("scaffold.json"), "{not json").unwrap();
        fs::write(root.path().join("good").join("scaffold.yml"), "description: Works\n").unwrap();

        let entries = TemplateCatalog::new(root.path()).entries().unwrap();

        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["bad", "good"]);
        assert_eq!(entries[0].description, None);
        assert_eq!(entries[1].description.as_deref(), Some("Works"));
    }
}
