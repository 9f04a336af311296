//! Platform-specific directory utilities

use std::path::PathBuf;

/// Get the platform-specific log directory for the simulator
///
/// - macOS: `~/Library/Caches/effect-sim/logs`
/// - Linux: `~/.cache/effect-sim/logs` (or `$XDG_CACHE_HOME/effect-sim/logs`)
/// - Windows: `%LOCALAPPDATA%\effect-sim\logs`
/// - Fallback: `/tmp/effect-sim/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "effect-sim")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/effect-sim"))
        .join("logs")
}
