#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::io::ErrorKind;
use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::Storage;
use crate::domain::models::StorageKey;

/// Stores each key as its own file inside `data_dir`.
pub struct FileStorage {
    pub data_dir: path::PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: path::PathBuf) -> FileStorage {
        return FileStorage { data_dir };
    }

    fn get_file_path(&self, key: StorageKey) -> path::PathBuf {
        return self.data_dir.join(format!("{key}.json"));
    }
}

#[async_trait]
impl Storage for FileStorage {
    #[allow(clippy::implicit_return)]
    async fn get(&self, key: StorageKey) -> Result<Option<String>> {
        match fs::read_to_string(self.get_file_path(key)).await {
            Ok(payload) => return Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
        }

        let file_path = self.get_file_path(key);
        let tmp_path = file_path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.flush().await?;
        fs::rename(&tmp_path, &file_path).await?;

        tracing::debug!(key = key.to_string(), bytes = value.len(), "storage write");
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn remove(&self, key: StorageKey) -> Result<()> {
        let file_path = self.get_file_path(key);
        if !file_path.exists() {
            return Ok(());
        }

        fs::remove_file(file_path).await?;
        return Ok(());
    }
}
