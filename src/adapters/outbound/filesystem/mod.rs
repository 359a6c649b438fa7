/// Filesystem adapters: package tree providers, license files and output
mod file_writer;
mod license_text_reader;
mod manifest;
mod node_modules_reader;
mod package_tree_file_reader;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use license_text_reader::FileSystemLicenseReader;
pub use manifest::PackageManifest;
pub use node_modules_reader::NodeModulesReader;
pub use package_tree_file_reader::PackageTreeFileReader;
