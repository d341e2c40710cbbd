use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{CatalogService, LoadReport};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        return _completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::List { file }) => _list(&container, file.as_deref()),
        Some(Commands::Find { id, file }) => _find(&container, id, file.as_deref()),
        Some(Commands::Remove { ids, file }) => _remove(&container, ids, file.as_deref()),
        Some(Commands::Tree { file }) => _tree(&container, file.as_deref()),
        Some(Commands::Shell { file }) => _shell(&container, file.as_deref()),
        Some(Commands::Config { command }) => _config(&container, command, cli.config.as_deref()),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => _shell(&container, None),
    }
}

/// Catalog path from the command line, else from settings.
fn resolve_catalog(container: &ServiceContainer, file: Option<&Path>) -> CliResult<PathBuf> {
    file.map(Path::to_path_buf)
        .or_else(|| container.settings.catalog.clone())
        .ok_or_else(|| {
            CliError::Usage("no catalog file given and no `catalog` configured".to_string())
        })
}

fn load_catalog(container: &ServiceContainer, file: Option<&Path>) -> CliResult<CatalogService> {
    let path = resolve_catalog(container, file)?;
    let mut service = container.catalog_service();
    let report = service.load(&path)?;
    report_skipped(&report);
    Ok(service)
}

fn report_skipped(report: &LoadReport) {
    for skipped in &report.skipped {
        output::warning(&format!(
            "{}: line {} skipped: {}",
            report.path.display(),
            skipped.line,
            skipped.reason
        ));
    }
}

fn print_listing(service: &CatalogService) {
    for course in service.courses() {
        output::info(&output::render_course_line(course));
    }
    output::header(&format!("{} courses", service.len()));
}

#[instrument(skip(container))]
fn _list(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    print_listing(&service);
    Ok(())
}

#[instrument(skip(container))]
fn _find(container: &ServiceContainer, id: &str, file: Option<&Path>) -> CliResult<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::InvalidArgs("course id must not be empty".to_string()));
    }
    let service = load_catalog(container, file)?;
    match service.find(id) {
        Some(course) => {
            output::info(&output::render_course_detail(course));
            Ok(())
        }
        None => Err(CliError::NotFound(id.to_string())),
    }
}

#[instrument(skip(container))]
fn _remove(container: &ServiceContainer, ids: &[String], file: Option<&Path>) -> CliResult<()> {
    let mut service = load_catalog(container, file)?;
    for id in ids {
        match service.remove(id) {
            Some(course) => output::success(&format!("Removed {}", course)),
            None => output::failure(&output::render_not_found(id)),
        }
    }
    print_listing(&service);
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let service = load_catalog(container, file)?;
    output::info(&output::render_structure(service.tree()));
    output::header(&format!(
        "{} courses, height {}",
        service.len(),
        service.tree().height()
    ));
    Ok(())
}

#[instrument(skip(container))]
fn _shell(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let mut service = container.catalog_service();
    let stdin = io::stdin();
    let mut menu = Menu::new(&mut service, stdin.lock(), io::stdout());
    if let Some(path) = file {
        menu.load_path(path)?;
    }
    menu.run()?;
    Ok(())
}

#[instrument(skip(container))]
fn _config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    config_file: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::info("global: (no config directory)"),
            }
            if let Some(path) = config_file {
                output::info(&format!("file:   {}", path.display()));
            }
        }
    }
    debug!("config command done");
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
