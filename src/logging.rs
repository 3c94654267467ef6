//! Log output for the CLI.
//!
//! Everything goes to stderr so stdout stays clean for `--json`. The level
//! defaults to `warn` (`debug` with `--verbose`) and `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
