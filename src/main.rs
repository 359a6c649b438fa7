mod cli;
mod config;

use cli::Args;
use config::Settings;
use npm_sbom::adapters::outbound::console::StderrProgressReporter;
use npm_sbom::adapters::outbound::filesystem::{
    FileSystemLicenseReader, NodeModulesReader, PackageTreeFileReader,
};
use npm_sbom::application::dto::SbomRequest;
use npm_sbom::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use npm_sbom::application::read_models::SbomReadModelBuilder;
use npm_sbom::application::use_cases::GenerateSbomUseCase;
use npm_sbom::ports::outbound::PackageTreeReader;
use npm_sbom::sbom_generation::domain::SpdxLicenseTable;
use npm_sbom::shared::error::{ExitCode, SbomError};
use npm_sbom::shared::security::read_limited_to_string;
use npm_sbom::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    // Validate project directory
    let project_dir = args.path.as_deref().unwrap_or(".");
    let project_path = PathBuf::from(project_dir);

    validate_project_path(&project_path)?;

    // Merge config file and flags
    let config_file = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(&project_path)?,
    };
    let settings = Settings::resolve(&args, config_file.as_ref())?;
    tracing::debug!(?settings, "effective settings");

    let spdx_licenses = load_spdx_table(settings.spdx_license_list.as_deref())?;

    // Create adapters (Dependency Injection)
    let tree_reader: Box<dyn PackageTreeReader> = match args.tree.as_deref() {
        Some(tree_path) => Box::new(PackageTreeFileReader::new(PathBuf::from(tree_path))),
        None => Box::new(NodeModulesReader::new()),
    };
    let license_reader = FileSystemLicenseReader::new();
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = GenerateSbomUseCase::new(
        tree_reader,
        license_reader,
        progress_reporter,
        spdx_licenses,
    );

    let request = SbomRequest::new(project_path)
        .with_dev_dependencies(settings.include_dev_dependencies)
        .with_serial_number(settings.include_serial_number)
        .with_license_data(settings.include_license_data)
        .with_license_text(settings.include_license_text);

    // Execute use case
    let response = use_case.execute(request)?;

    // Display progress message
    eprintln!("{}", FormatterFactory::progress_message(settings.format));

    let read_model = SbomReadModelBuilder::build(&response.document);
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&read_model)?;

    // Present output
    let presenter = PresenterFactory::create(PresenterType::from_output(
        args.output.map(PathBuf::from),
    ));
    presenter.present(&formatted_output)?;

    Ok(())
}

fn load_spdx_table(path: Option<&Path>) -> Result<SpdxLicenseTable> {
    let Some(path) = path else {
        return Ok(SpdxLicenseTable::bundled());
    };

    let content = read_limited_to_string(path, "SPDX license list").map_err(|e| {
        SbomError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
    })?;
    let table = SpdxLicenseTable::from_json_str(&content)?;
    tracing::debug!(path = %path.display(), licenses = table.len(), "loaded SPDX license list");
    Ok(table)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    let metadata = std::fs::symlink_metadata(path).map_err(|e| SbomError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(SbomError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
