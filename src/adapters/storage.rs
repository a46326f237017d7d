use crate::core::Storage;
use crate::utils::error::{ContactError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files on the local disk, relative names resolved against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        // join 遇到絕對路徑會直接取代
        Path::new(&self.base_path).join(path)
    }
}

fn unavailable(path: &Path, source: std::io::Error) -> ContactError {
    ContactError::IoUnavailable {
        path: path.display().to_string(),
        source,
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| unavailable(&full_path, e))
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| unavailable(parent, e))?;
            }
        }

        fs::write(&full_path, data).map_err(|e| unavailable(&full_path, e))?;
        Ok(full_path.display().to_string())
    }
}
