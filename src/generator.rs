//! Project generation.
//!
//! Generation runs in two passes. The planning pass walks the template in
//! lexical order, renders every path and body and checks every destination,
//! writing nothing. The write pass applies the plan. Any error in planning,
//! including a conflict without overwrite permission, leaves the output tree
//! untouched.

use log::{debug, error, info};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use walkdir::WalkDir;

use crate::config::TemplateConfig;
use crate::context::Variables;
use crate::digest::digest_file;
use crate::error::{Error, Result};
use crate::ignore::build_ignore_set;
use crate::ioutils::{create_dir_all, write_file};
use crate::loader::TemplateCatalog;
use crate::renderer::{PlaceholderRenderer, TemplateRenderer};
use crate::template::{operation::TemplateOperation, processor::TemplateProcessor};

/// Relative POSIX path of every generated file mapped to its content digest.
pub type FileDigests = BTreeMap<String, String>;

/// Operations planned for one generation run, in application order.
#[derive(Debug, Default)]
pub struct GenerationPlan {
    operations: Vec<TemplateOperation>,
}

impl GenerationPlan {
    pub fn operations(&self) -> &[TemplateOperation] {
        &self.operations
    }

    /// Relative paths of the files the plan writes.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().filter_map(|operation| match operation {
            TemplateOperation::Write { relative, .. } => Some(relative.as_str()),
            _ => None,
        })
    }
}

pub struct Generator<'a> {
    engine: &'a dyn TemplateRenderer,
    overwrite: bool,
}

impl<'a> Generator<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer, overwrite: bool) -> Self {
        Self { engine, overwrite }
    }

    /// Plans the generation of `template_root` into `output_root`.
    ///
    /// # Errors
    /// * `Error::UndefinedVariable` - a path or body references an unknown variable
    /// * `Error::InvalidRenderedPath` - a rendered path leaves the output root
    /// * `Error::FileAlreadyExists` - a target file exists, or two entries render
    ///   to the same file, and overwrite is not allowed
    pub fn plan(
        &self,
        template_root: &Path,
        output_root: &Path,
        variables: &Variables,
        config: &TemplateConfig,
    ) -> Result<GenerationPlan> {
        let ignore = build_ignore_set(config)?;
        let processor = TemplateProcessor::new(
            self.engine,
            &ignore,
            template_root,
            output_root,
            variables,
            &config.template_suffix,
        );

        let mut plan = GenerationPlan::default();
        let mut planned_files = HashSet::new();

        let walker = WalkDir::new(template_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !processor.is_ignored(entry.path()));

        for dir_entry in walker {
            let template_entry = dir_entry?;
            let operation = processor.process(template_entry.path())?;

            if let TemplateOperation::Write { relative, target, target_exists, .. } = &operation {
                let duplicate = !planned_files.insert(relative.clone());
                if (*target_exists || duplicate) && !self.overwrite {
                    return Err(Error::FileAlreadyExists { path: target.display().to_string() });
                }
            }

            plan.operations.push(operation);
        }

        debug!("Planned {} operations", plan.operations.len());
        Ok(plan)
    }

    /// Applies `plan` below `output_root` and returns the digest of every
    /// written file, computed from the bytes on disk.
    pub fn apply(&self, plan: &GenerationPlan, output_root: &Path) -> Result<FileDigests> {
        create_dir_all(output_root)?;

        let mut files = FileDigests::new();
        for operation in plan.operations() {
            if let Err(e) = self.apply_operation(operation, &mut files) {
                if let Some(target) = operation.target_path() {
                    error!("Failed to apply operation on '{}'", target.display());
                }
                return Err(e);
            }
            info!("{}", operation.get_message(false));
        }

        Ok(files)
    }

    fn apply_operation(
        &self,
        operation: &TemplateOperation,
        files: &mut FileDigests,
    ) -> Result<()> {
        match operation {
            TemplateOperation::Write { relative, target, content, .. } => {
                write_file(content, target)?;
                files.insert(relative.clone(), digest_file(target)?);
            }
            TemplateOperation::CreateDirectory { target, target_exists, .. } => {
                if !target_exists {
                    create_dir_all(target)?;
                }
            }
            TemplateOperation::Ignore { .. } => {}
        }
        Ok(())
    }

    /// Plans and applies the generation in one go.
    pub fn run(
        &self,
        template_root: &Path,
        output_root: &Path,
        variables: &Variables,
        config: &TemplateConfig,
    ) -> Result<FileDigests> {
        let plan = self.plan(template_root, output_root, variables, config)?;
        self.apply(&plan, output_root)
    }
}

/// Generates `template_name` from the catalog at `catalog_root` into
/// `destination_root`.
///
/// `variables` must hold every identifier the template references. The
/// manifest is not written here, see [`crate::manifest::Manifest`].
pub fn generate<P: AsRef<Path>, Q: AsRef<Path>>(
    catalog_root: P,
    template_name: &str,
    destination_root: Q,
    variables: &Variables,
    overwrite: bool,
) -> Result<FileDigests> {
    let template_root = TemplateCatalog::new(catalog_root.as_ref()).resolve(template_name)?;
    let config = TemplateConfig::load_config(&template_root)?;
    let engine = PlaceholderRenderer::new();

    Generator::new(&engine, overwrite).run(
        &template_root,
        destination_root.as_ref(),
        variables,
        &config,
    )
}
