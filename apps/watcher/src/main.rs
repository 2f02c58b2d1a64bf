//! `hslog-watcher [CONFIG]`: tails the Hearthstone logs and prints one JSON
//! event per line on stdout until interrupted.

mod app;
mod config;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // stdout is reserved for events.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = config::config_path(std::env::args_os().nth(1))?;
    let options = config::Config::load(&path)?.into_options();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %path.display(),
        log_file = %options.log_file.display(),
        "hslog-watcher starting"
    );

    tokio::runtime::Runtime::new()?.block_on(app::run(options))
}
