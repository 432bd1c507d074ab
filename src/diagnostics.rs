//! Logging setup. Everything goes to stderr so stdout stays free for the
//! usage text and the "Wrote ..." lines.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `-v` when set.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Data-quality warning tied to a spot in an input file.
pub fn warn_at(path: &std::path::Path, row: usize, msg: impl AsRef<str>) {
    tracing::warn!("{}:{}: {}", path.display(), row, msg.as_ref());
}
