//! Platform directories for the user config file and the default log file.

use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "deepwiki")
}

/// `$XDG_CONFIG_HOME/deepwiki/config.toml` (platform equivalent elsewhere).
pub fn global_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Directory for log files. Falls back to the local data dir on platforms
/// without a state dir.
pub fn state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| {
        dirs.state_dir()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| dirs.data_local_dir().to_path_buf())
    })
}
