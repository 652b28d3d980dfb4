//! Output file of created pull request URLs.

use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Appends pull request URLs to a file, one per line, as they are created.
///
/// The file is truncated when the recorder is created and flushed after
/// every line, so an interrupted run keeps the URLs it already produced.
#[derive(Debug)]
pub struct UrlRecorder {
    path: PathBuf,
    file: File,
    recorded: usize,
}

impl UrlRecorder {
    /// Creates (or truncates) the output file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub async fn create(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path).await?;
        debug!(path = %path.display(), "Recording pull request URLs");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            recorded: 0,
        })
    }

    /// Appends one URL.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the line cannot be written.
    pub async fn record(&mut self, url: &str) -> std::io::Result<()> {
        self.file.write_all(url.as_bytes()).await?;
        self.file.write_all(b"\n").await?;
        self.file.flush().await?;
        self.recorded += 1;
        Ok(())
    }

    /// Number of URLs written so far.
    #[must_use]
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Path of the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
