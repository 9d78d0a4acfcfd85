//! Caller-facing operations: list the catalog, create a project, inspect one.

use log::debug;
use std::path::{Path, PathBuf};

use crate::config::TemplateConfig;
use crate::constants::defaults;
use crate::context::{build_variables, ProjectFields, Variables};
use crate::error::Result;
use crate::generator::{GenerationPlan, Generator};
use crate::loader::{TemplateCatalog, TemplateEntry};
use crate::manifest::write_manifest;
use crate::renderer::PlaceholderRenderer;
use crate::status::{status, StatusReport};

/// Everything needed to create a project.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub fields: ProjectFields,
    pub template: String,
    /// Parent directory; the project lands in `output_dir/<slug>`.
    pub output_dir: PathBuf,
    /// Caller supplied variables, overriding every other source.
    pub extra: Variables,
    pub overwrite: bool,
}

impl CreateRequest {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            fields: ProjectFields::new(name),
            template: defaults::TEMPLATE.to_string(),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            extra: Variables::new(),
            overwrite: false,
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.output_dir.join(self.fields.slug())
    }
}

/// A fully checked generation that has not touched the filesystem yet.
#[derive(Debug)]
pub struct ProjectPlan {
    pub destination: PathBuf,
    pub template: String,
    pub plan: GenerationPlan,
}

/// Returns the sorted names of every template in the catalog.
pub fn list_templates<P: AsRef<Path>>(catalog_root: P) -> Result<Vec<String>> {
    TemplateCatalog::new(catalog_root.as_ref()).list()
}

/// Like [`list_templates`], with the description each template declares.
pub fn describe_templates<P: AsRef<Path>>(catalog_root: P) -> Result<Vec<TemplateEntry>> {
    TemplateCatalog::new(catalog_root.as_ref()).entries()
}

/// Renders and checks the whole project without writing anything.
pub fn plan_project<P: AsRef<Path>>(
    catalog_root: P,
    request: &CreateRequest,
) -> Result<ProjectPlan> {
    let template_root = TemplateCatalog::new(catalog_root.as_ref()).resolve(&request.template)?;
    let config = TemplateConfig::load_config(&template_root)?;
    let variables = build_variables(&config.variables, &request.fields, &request.extra);
    let destination = std::path::absolute(request.destination())?;
    debug!(
        "Planning '{}' into {} with {} variables",
        request.template,
        destination.display(),
        variables.len()
    );

    let engine = PlaceholderRenderer::new();
    let plan = Generator::new(&engine, request.overwrite).plan(
        &template_root,
        &destination,
        &variables,
        &config,
    )?;

    Ok(ProjectPlan { destination, template: request.template.clone(), plan })
}

/// Creates the project described by `request` and records its manifest.
///
/// Returns the project directory.
///
/// # Errors
/// * `Error::TemplateNotFound` - the template is not in the catalog
/// * `Error::UndefinedVariable` - the template references an unknown variable
/// * `Error::FileAlreadyExists` - a file would be replaced without `overwrite`
///
/// Nothing is written when any of these occur.
pub fn create_project<P: AsRef<Path>>(
    catalog_root: P,
    request: &CreateRequest,
) -> Result<PathBuf> {
    let ProjectPlan { destination, template, plan } = plan_project(catalog_root, request)?;

    let engine = PlaceholderRenderer::new();
    let files = Generator::new(&engine, request.overwrite).apply(&plan, &destination)?;
    write_manifest(&destination, &template, files)?;

    Ok(destination)
}

/// Classifies the files of the project at `project_root`.
pub fn project_status<P: AsRef<Path>>(project_root: P) -> Result<StatusReport> {
    status(project_root)
}
