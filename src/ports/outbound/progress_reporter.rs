/// ProgressReporter port for reporting pipeline progress to the user
///
/// Scans of container images can take minutes, so the diff engine reports
/// each stage it enters. Implementations must not write to stdout, which is
/// reserved for the rendered report.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports that pipeline stage `stage` of `total` has started
    fn report_stage(&self, stage: usize, total: usize, message: &str);

    /// Reports a non-fatal problem, such as a release whose scan failed
    fn report_warning(&self, message: &str);

    /// Reports that the pipeline finished
    fn report_completion(&self, message: &str);
}
