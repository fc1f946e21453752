use std::{env, fs, path::Path, path::PathBuf};

use dirs::home_dir;

use crate::errors::SyncError;

const DEFAULT_DIR_NAME: &str = ".expense_core";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

/// Creates the directory (and any parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Returns the application data directory, defaulting to
/// `~/.expense_core` and honoring the `EXPENSE_CORE_HOME` override.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
