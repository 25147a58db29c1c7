use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    /// Stages every file as a sibling temp file and renames them into place
    /// only once all of them are written. A failed stage leaves every target
    /// untouched.
    fn write_files(&self, files: &[(&str, &[u8])]) -> Result<()> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());

        for (path, data) in files {
            let full_path = self.resolve(path);
            let tmp_path = tmp_path_for(&full_path);
            let written = match full_path.parent() {
                Some(parent) => fs::create_dir_all(parent),
                None => Ok(()),
            }
            .and_then(|_| fs::write(&tmp_path, data));

            if let Err(e) = written {
                tracing::debug!("Staging {} failed: {}", full_path.display(), e);
                let _ = fs::remove_file(&tmp_path);
                discard(&staged);
                return Err(e.into());
            }
            staged.push((tmp_path, full_path));
        }

        for (i, (tmp_path, full_path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp_path, full_path) {
                discard(&staged[i..]);
                return Err(e.into());
            }
        }
        Ok(())
    }
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp_path, _) in staged {
        let _ = fs::remove_file(tmp_path);
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
