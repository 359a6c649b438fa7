/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (package tree, license files, console).
pub mod formatter;
pub mod license_text_reader;
pub mod output_presenter;
pub mod package_tree_reader;
pub mod progress_reporter;

pub use formatter::SbomFormatter;
pub use license_text_reader::LicenseTextReader;
pub use output_presenter::OutputPresenter;
pub use package_tree_reader::{PackageTreeReader, TreeReadOptions};
pub use progress_reporter::ProgressReporter;
