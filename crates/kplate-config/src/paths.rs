//! Where presets live on disk.
//!
//! - **User presets**: `<config dir>/kplate/presets/` (`~/.config` on Linux,
//!   `~/Library/Application Support` on macOS, `%APPDATA%` on Windows)
//! - **System presets**: `/usr/share/kplate/presets/` on Linux,
//!   `/Library/Application Support/kplate/presets/` on macOS, the data dir
//!   elsewhere
//!
//! # Example
//!
//! ```rust,no_run
//! use kplate_config::paths;
//!
//! if let Some(path) = paths::find_preset("my_plate") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

const APP_NAME: &str = "kplate";
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user presets directory, relative to `.` if the platform has
/// no config directory.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Returns the read-only, system-wide presets directory.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by name or path.
///
/// An existing file path wins. Otherwise `name` (with `.toml` appended if
/// missing) is looked up in the user directory, then the system directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir(), system_presets_dir()])
}

fn find_preset_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    dirs.iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Creates the user presets directory if needed and returns it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// Preset files in the user directory followed by the system directory.
///
/// Missing or unreadable directories contribute nothing.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_presets_in_dir(&user_presets_dir());
    presets.extend(list_presets_in_dir(&system_presets_dir()));
    presets
}

fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Preset name from a file path (the file stem).
///
/// ```rust
/// use kplate_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/vocal_plate.toml"));
/// assert_eq!(name, Some("vocal_plate".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
