//! Backs up Fields of Mistria saves and drives the external VaultC tool to
//! unpack a save into a directory or pack a directory back into a save.
//!
//! The save format itself is VaultC's business; this crate only handles the
//! paths, the backup copy and the process call, and has no UI dependency.

mod error;
pub mod layout;
pub mod orchestrator;
pub mod runner;
pub mod selection;
pub mod settings;

pub use error::{Error, Result};
pub use layout::Layout;
pub use orchestrator::{
    clean_up, Backup, BackupAction, Cleanup, CleanupFailure, Orchestrator, PackOutcome, Prompt,
    UnpackOutcome,
};
pub use runner::{Invocation, SystemRunner, ToolOutcome, ToolRunner};
pub use selection::{display_name, Requirement, Selection};
pub use settings::Settings;

/// Installs the `tracing` subscriber used by both binaries. `RUST_LOG`
/// overrides the default `info` level.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
