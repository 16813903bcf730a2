//! Directory where the executable lives. The optional `fractoscope.json`
//! startup configuration is read from here.

use std::path::PathBuf;

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Location of the startup configuration file.
pub fn config_path() -> PathBuf {
    exe_directory().join("fractoscope.json")
}
