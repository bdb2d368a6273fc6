use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs;

/// Flat directory holding uploaded photos, addressed by generated filename.
///
/// Filenames are `<millis-since-epoch>_<original-name>`, which keeps writes
/// practically collision-free without a lookup pass.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` under a freshly generated name and return that name.
    /// Creates the directory on first use.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        fs::create_dir_all(&self.dir).await?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let name = format!("{millis}_{original_name}");
        fs::write(self.dir.join(&name), bytes).await?;

        Ok(name)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Resolved location of a stored file.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_prefixes_timestamp_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStore::new(dir.path());

        let name = files.save("photo.png", b"raw bytes").await.unwrap();
        assert!(name.ends_with("_photo.png"));
        assert_eq!(std::fs::read(files.path(&name)).unwrap(), b"raw bytes");
    }

    #[tokio::test]
    async fn remove_ignores_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStore::new(dir.path());

        files.remove("never-written.png").await.unwrap();
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStore::new(dir.path());

        let name = files.save("photo.png", b"x").await.unwrap();
        files.remove(&name).await.unwrap();
        assert!(!files.path(&name).exists());
    }
}
