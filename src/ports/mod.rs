/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the CLI drives the use case directly, and the
/// use case reaches the file system and console through these traits.
pub mod outbound;
