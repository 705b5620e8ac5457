//! Locating and reading/writing files under the app directory (~/.flapper/).

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Overrides the app directory, mainly for running several setups side by side.
pub const HOME_ENV_VAR: &str = "FLAPPER_HOME";

pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flapper.log";

/// The directory holding the config file and the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// `$FLAPPER_HOME` if set, otherwise `~/.flapper`.
    pub fn locate() -> io::Result<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV_VAR) {
            return Ok(Self::at(dir));
        }
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Ok(Self::at(home_dir.join(".flapper")))
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if needed.
    pub fn ensure(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }
}

/// File contents, or `None` if the file does not exist.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> AppDirs {
        let dir = std::env::temp_dir().join(format!("flapper-persistence-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        AppDirs::at(dir)
    }

    #[test]
    fn test_paths_under_root() {
        let dirs = AppDirs::at("/tmp/flapper-root");
        assert!(dirs.config_path().ends_with("flapper-root/config.json"));
        assert!(dirs.log_path().ends_with("flapper-root/flapper.log"));
    }

    #[test]
    fn test_read_missing_is_none() {
        let dirs = scratch_dir("missing");
        let contents = read_if_exists(&dirs.config_path()).expect("missing file is not an error");
        assert!(contents.is_none());
    }

    #[test]
    fn test_save_and_read_back() {
        let dirs = scratch_dir("roundtrip");
        let data = vec!["hello".to_string(), "world".to_string()];
        save_json(&dirs.config_path(), &data).expect("save should succeed");

        let contents = read_if_exists(&dirs.config_path())
            .expect("read should succeed")
            .expect("file should exist");
        let loaded: Vec<String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(loaded, data);

        fs::remove_dir_all(dirs.root()).ok();
    }
}
