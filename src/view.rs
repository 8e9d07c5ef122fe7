/// Everything the fetch logic is allowed to do to the screen.
///
/// The controller only ever talks to this trait, so it can be exercised in
/// tests against a recording fake instead of a live terminal.
pub trait StatsView {
    /// Toggle the in-flight indicator.
    fn set_loading(&mut self, loading: bool);

    /// Overwrite the two scalar displays with the snapshot totals, verbatim.
    fn set_totals(&mut self, total_queries: u64, unique_users: u64);

    /// Rebuild the daily-counts chart from positionally paired sequences.
    fn set_chart(&mut self, labels: Vec<String>, values: Vec<u64>);

    /// Surface a blocking alert. Must not disturb previously displayed data.
    fn show_error(&mut self, message: &str);
}
