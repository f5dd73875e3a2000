pub mod config;
pub mod models;
pub mod pipeline;
pub mod timeline; // Chronological event projection over extracted entries

use tracing_subscriber::EnvFilter;

pub use pipeline::processor::{
    build_coordinator, ProcessingCoordinator, ProcessingError, ProcessingResult, StatusReport,
};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config::default_log_filter()`.
/// Safe to call more than once: later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
