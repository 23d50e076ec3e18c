use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

/// Environment variable holding the log filter, e.g. `LABDASH_LOG=labdash=debug`.
pub const LOG_ENV: &str = "LABDASH_LOG";

pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = HierarchicalLayer::new(2)
        .with_writer(std::io::stderr)
        .with_targets(true)
        .with_bracketed_fields(true);
    if let Err(err) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        eprintln!("logging already initialized: {err}");
    }
}
