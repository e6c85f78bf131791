mod config;
pub mod kanban;

pub use config::{Config, SoundConfig, TimerSection};
pub use kanban::{BoardColumn, Kanban, KanbanStore, TaskFields, TaskRecord};

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "TIME_WIZARD_HOME";

/// Returns `$TIME_WIZARD_HOME` if set, otherwise `~/.config/time-wizard/`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("time-wizard"),
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
