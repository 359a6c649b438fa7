use clap::Parser;
use npm_sbom::application::dto::OutputFormat;

/// Generate CycloneDX SBOMs for npm projects from the installed node_modules tree
#[derive(Parser, Debug)]
#[command(name = "npm-sbom")]
#[command(version)]
#[command(
    about = "Generate CycloneDX SBOMs for npm projects from the installed node_modules tree",
    long_about = None
)]
pub struct Args {
    /// Output format: xml or json [default: xml]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Include devDependencies of the root project
    #[arg(short = 'd', long = "include-dev")]
    pub include_dev: bool,

    /// Do not emit a serialNumber attribute
    #[arg(long)]
    pub no_serial_number: bool,

    /// Do not resolve license information
    #[arg(long)]
    pub no_license_data: bool,

    /// Do not attach license texts found next to packages
    #[arg(long)]
    pub no_license_text: bool,

    /// Read a pre-resolved package tree (JSON) instead of scanning node_modules
    #[arg(long, value_name = "FILE")]
    pub tree: Option<String>,

    /// Path to a config file (defaults to npm-sbom.config.yml in the project directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
