/// ProgressReporter port for user-facing status output
///
/// Everything reported here goes to stderr so that the document on
/// stdout stays machine-readable.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports traversal progress
    ///
    /// # Arguments
    /// * `current` - Packages visited so far
    /// * `total` - Packages in the tree
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
