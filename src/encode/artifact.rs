use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::CrtResult;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An output file that is deleted when dropped unless it has been persisted.
#[derive(Debug)]
pub struct TempArtifact {
    path: Option<PathBuf>,
}

impl TempArtifact {
    /// Take ownership of `path`; the file (if any) is removed on drop.
    pub fn adopt(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// A fresh, unused path in the system temp directory.
    pub fn in_temp_dir(prefix: &str, extension: &str) -> Self {
        Self::adopt(std::env::temp_dir().join(unique_name(prefix, extension)))
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Read the artifact's bytes.
    pub fn read(&self) -> CrtResult<Vec<u8>> {
        Ok(std::fs::read(self.path())?)
    }

    /// Atomically move the artifact to `dest` and stop tracking it.
    pub fn persist(mut self, dest: &Path) -> CrtResult<()> {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::rename(&path, dest) {
                self.path = Some(path);
                return Err(e.into());
            }
        }
        Ok(())
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Sibling of `out` used while it is being written, so a partial file never appears under the
/// final name.
pub(crate) fn sibling_temp_path(out: &Path) -> PathBuf {
    let stem = out
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "animation".to_owned());
    let name = unique_name(&format!(".{stem}"), "tmp");
    match out.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}

fn unique_name(prefix: &str, extension: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "{prefix}-{}-{nanos}-{seq}.{extension}",
        std::process::id()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/encode/artifact.rs"]
mod tests;
