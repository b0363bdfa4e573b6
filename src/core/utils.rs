use dirs::home_dir;
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::FinanceError;

const DEFAULT_DIR_NAME: &str = ".finance_core";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "FINANCE_CORE_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Resolves where the application keeps its local files.
pub struct PathResolver;

impl PathResolver {
    /// `$FINANCE_CORE_HOME`, falling back to `~/.finance_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), FinanceError> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling staging path, e.g. `snapshot.json` -> `snapshot.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to a staging file and renames it over `path`, creating the
/// parent directory first.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), FinanceError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix() {
        let path = Path::new("/data/snapshot.json");
        assert_eq!(tmp_path(path), PathBuf::from("/data/snapshot.json.tmp"));
        assert_eq!(tmp_path(Path::new("/data/raw")), PathBuf::from("/data/raw.tmp"));
    }

    #[test]
    fn write_atomic_replaces_contents_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!tmp_path(&path).exists());
    }
}
