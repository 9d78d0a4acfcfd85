use crate::{
    cli::{CreateArgs, ListArgs, StatusArgs},
    context::{parse_vars, ProjectFields},
    error::Result,
    manifest::Manifest,
    project::{create_project, describe_templates, plan_project, project_status, CreateRequest},
    status::StatusReport,
};
use std::io::Write;

use super::Commands;

/// Dispatches a parsed command, printing its result to `out`.
pub struct Runner<W: Write> {
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Create(args) => self.create(args),
            Commands::List(args) => self.list(args),
            Commands::Status(args) => self.status(args),
        }
    }

    fn create(&mut self, args: CreateArgs) -> Result<()> {
        let request = build_request(&args)?;

        if args.dry_run {
            let planned = plan_project(&args.templates_dir, &request)?;
            for operation in planned.plan.operations() {
                writeln!(self.out, "{}", operation.get_message(true))?;
            }
            writeln!(
                self.out,
                "[DRY RUN] Project would be created at: {}",
                planned.destination.display()
            )?;
            return Ok(());
        }

        let destination = create_project(&args.templates_dir, &request)?;
        writeln!(self.out, "Project created at: {}", destination.display())?;
        writeln!(self.out, "Manifest written to: {}", Manifest::path(&destination).display())?;
        Ok(())
    }

    fn list(&mut self, args: ListArgs) -> Result<()> {
        let templates = describe_templates(&args.templates_dir)?;
        if templates.is_empty() {
            writeln!(self.out, "No templates found.")?;
            return Ok(());
        }

        writeln!(self.out, "Available templates:")?;
        for template in templates {
            match template.description {
                Some(description) => writeln!(self.out, "- {}: {description}", template.name)?,
                None => writeln!(self.out, "- {}", template.name)?,
            }
        }
        Ok(())
    }

    fn status(&mut self, args: StatusArgs) -> Result<()> {
        let report = project_status(&args.project)?;
        if args.json {
            writeln!(self.out, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            self.print_report(&report)?;
        }
        Ok(())
    }

    fn print_report(&mut self, report: &StatusReport) -> Result<()> {
        writeln!(self.out, "Template: {}", report.template)?;
        writeln!(self.out, "Generated (unchanged): {}", report.unchanged.len())?;
        writeln!(self.out, "Modified generated: {}", report.modified.len())?;
        writeln!(self.out, "Deleted generated: {}", report.deleted.len())?;
        writeln!(self.out, "Custom files: {}", report.custom.len())?;

        self.print_section("Modified generated files", &report.modified)?;
        self.print_section("Deleted generated files", &report.deleted)?;
        self.print_section("Custom files", &report.custom)
    }

    fn print_section(&mut self, title: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "\n{title}:")?;
        for item in items {
            writeln!(self.out, "- {item}")?;
        }
        Ok(())
    }
}

fn build_request(args: &CreateArgs) -> Result<CreateRequest> {
    let fields = ProjectFields {
        description: args.description.clone(),
        python_version: args.python.clone(),
        license: args.license.clone(),
        author: args.author.clone(),
        email: args.email.clone(),
        ..ProjectFields::new(args.name.as_str())
    };

    Ok(CreateRequest {
        fields,
        template: args.template.clone(),
        output_dir: args.output.clone(),
        extra: parse_vars(&args.vars)?,
        overwrite: args.overwrite,
    })
}

/// Main entry point for CLI execution
pub fn run(command: Commands) -> Result<()> {
    let stdout = std::io::stdout();
    Runner::new(stdout.lock()).run(command)
}
