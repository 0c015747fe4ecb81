//! The file-delivery boundary.
//!
//! The export core produces bytes plus a filename; what "download" means
//! belongs to the host. Native hosts can use [`DirectorySink`]; a browser
//! host would deliver through an anchor click instead.

use std::path::{Path, PathBuf};

/// Delivers produced files, one call per file.
pub trait FileSink: Send {
    fn deliver(
        &mut self,
        bytes: &[u8],
        filename: &str,
    ) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}

/// Writes delivered files into a directory.
pub struct DirectorySink {
    root_path: PathBuf,
}

impl DirectorySink {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            root_path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

impl FileSink for DirectorySink {
    async fn deliver(&mut self, bytes: &[u8], filename: &str) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root_path).await?;
        let path = self.root_path.join(filename);
        tokio::fs::write(&path, bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
