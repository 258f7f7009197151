//! Short-lived local copies of uploaded payloads
//!
//! A [`TransientFile`] owns its path for exactly one store-and-forward
//! attempt. The file is deleted when the guard drops, whichever way the
//! attempt ends, including cancellation of the surrounding future.
//!
//! Payloads are written chunk by chunk through a [`TransientWriter`], so an
//! upload never needs to sit in memory as a whole.

use std::path::Path;

use axum::body::Bytes;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;

use crate::error::{Result, UploadError};

const PREFIX: &str = "upload-";

/// Uniquely named file removed on drop
#[derive(Debug)]
pub struct TransientFile {
    path: Option<TempPath>,
    len: u64,
}

/// Open handle filling a [`TransientFile`]
///
/// Dropping the writer before [`finish`](Self::finish) removes the partial file.
#[derive(Debug)]
pub struct TransientWriter {
    file: tokio::fs::File,
    guard: TransientFile,
}

impl TransientFile {
    /// Create an empty file inside `dir`, ready for writing
    ///
    /// The extension of `filename`, when it is plain alphanumeric, is kept as
    /// the suffix so stray files stay recognizable.
    pub async fn create(dir: &Path, filename: &str) -> Result<TransientWriter> {
        let dir = dir.to_path_buf();
        let suffix = suffix_for(filename);

        let (file, path) = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(PREFIX)
                .suffix(&suffix)
                .tempfile_in(&dir)
                .map(tempfile::NamedTempFile::into_parts)
        })
        .await
        .map_err(|e| UploadError::TransientStorage(format!("transient create task failed: {e}")))?
        .map_err(storage_error)?;

        tracing::debug!(path = %path.display(), "transient copy created");

        Ok(TransientWriter {
            file: tokio::fs::File::from_std(file),
            guard: Self {
                path: Some(path),
                len: 0,
            },
        })
    }

    /// Write `data` to a fresh file inside `dir` in one go
    pub async fn persist(dir: &Path, filename: &str, data: Bytes) -> Result<Self> {
        let mut writer = Self::create(dir, filename).await?;
        writer.write(&data).await?;
        writer.finish().await
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Size of the stored payload in bytes
    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TransientWriter {
    /// Append `chunk` to the file
    pub async fn write(&mut self, chunk: &[u8]) -> Result<()> {
        self.file.write_all(chunk).await.map_err(storage_error)?;
        self.guard.len += chunk.len() as u64;
        Ok(())
    }

    /// Bytes written so far
    pub const fn len(&self) -> u64 {
        self.guard.len
    }

    pub const fn is_empty(&self) -> bool {
        self.guard.len == 0
    }

    /// Flush everything to disk and hand back the guard
    pub async fn finish(self) -> Result<TransientFile> {
        let Self { mut file, guard } = self;

        file.flush().await.map_err(storage_error)?;
        file.sync_all().await.map_err(storage_error)?;

        tracing::debug!(path = %guard.path().display(), bytes = guard.len, "transient copy written");

        Ok(guard)
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        let removed = path.to_path_buf();

        match path.close() {
            Ok(()) => tracing::debug!(path = %removed.display(), "transient copy removed"),
            Err(e) => tracing::warn!(path = %removed.display(), "failed to remove transient copy: {e}"),
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn storage_error(err: std::io::Error) -> UploadError {
    UploadError::TransientStorage(err.to_string())
}

fn suffix_for(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 16 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn file_holds_payload_until_dropped() {
        let dir = tempfile::tempdir().unwrap();

        let file = TransientFile::persist(dir.path(), "cat.png", Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();

        let path = file.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
        assert_eq!(file.len(), 4);
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("upload-"));
        assert_eq!(path.extension().unwrap(), "png");

        drop(file);

        assert!(!path.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn chunks_are_appended_in_order() {
        let dir = tempfile::tempdir().unwrap();

        let mut writer = TransientFile::create(dir.path(), "notes.txt").await.unwrap();
        writer.write(b"hello ").await.unwrap();
        writer.write(b"world").await.unwrap();
        assert_eq!(writer.len(), 11);

        let file = writer.finish().await.unwrap();

        assert_eq!(std::fs::read(file.path()).unwrap(), b"hello world");
        assert_eq!(file.len(), 11);
    }

    #[tokio::test]
    async fn abandoned_writer_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut writer = TransientFile::create(dir.path(), "big.bin").await.unwrap();
        writer.write(&[0u8; 64]).await.unwrap();
        assert_eq!(entries(dir.path()), 1);

        drop(writer);

        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn concurrent_copies_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();

        let a = TransientFile::persist(dir.path(), "a.txt", Bytes::from_static(b"a"))
            .await
            .unwrap();
        let b = TransientFile::persist(dir.path(), "a.txt", Bytes::from_static(b"b"))
            .await
            .unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(entries(dir.path()), 2);
    }

    #[tokio::test]
    async fn missing_directory_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = TransientFile::persist(&missing, "a.txt", Bytes::from_static(b"a"))
            .await
            .unwrap_err();

        assert!(matches!(err, UploadError::TransientStorage(_)));
    }

    #[tokio::test]
    async fn file_already_gone_is_only_logged() {
        let dir = tempfile::tempdir().unwrap();

        let file = TransientFile::persist(dir.path(), "a.txt", Bytes::from_static(b"a"))
            .await
            .unwrap();
        std::fs::remove_file(file.path()).unwrap();

        drop(file);

        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn suffix_keeps_only_plain_extensions() {
        assert_eq!(suffix_for("photo.JPG"), ".JPG");
        assert_eq!(suffix_for("archive.tar.gz"), ".gz");
        assert_eq!(suffix_for("README"), "");
        assert_eq!(suffix_for("evil.p/hp"), "");
        assert_eq!(suffix_for("weird.ex t"), "");
    }
}
