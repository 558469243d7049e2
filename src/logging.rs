/// Initializes `tracing` output for the CLI.
///
/// Verbosity comes from `RUST_LOG`; with nothing set only errors are
/// printed so the prompts stay readable. Logs go to stderr.
///
/// - `RUST_LOG=netpulse_status=info` - fetch and update summaries
/// - `RUST_LOG=netpulse_status=debug` - requests and skipped entries
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
