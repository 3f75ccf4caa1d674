use anyhow::Result;

use super::FileStorage;
use crate::domain::models::Storage;
use crate::domain::models::StorageKey;

#[tokio::test]
async fn it_returns_none_for_missing_keys() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path().join("groxai"));

    assert!(storage.get(StorageKey::Chats).await?.is_none());
    return Ok(());
}

#[tokio::test]
async fn it_creates_data_dir_and_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let data_dir = dir.path().join("nested/groxai");
    let storage = FileStorage::new(data_dir.clone());

    storage.set(StorageKey::ActiveChat, "1700000000000").await?;

    assert!(data_dir.join("groxai-active-chat.json").exists());
    assert_eq!(
        storage.get(StorageKey::ActiveChat).await?,
        Some("1700000000000".to_string())
    );
    return Ok(());
}

#[tokio::test]
async fn it_overwrites_previous_value() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path().to_path_buf());

    storage.set(StorageKey::Theme, "light").await?;
    storage.set(StorageKey::Theme, "dark").await?;

    assert_eq!(storage.get(StorageKey::Theme).await?, Some("dark".to_string()));
    assert!(!dir.path().join("groxai-theme.json.tmp").exists());
    return Ok(());
}

#[tokio::test]
async fn it_removes_keys() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path().to_path_buf());

    storage.remove(StorageKey::Chats).await?;
    storage.set(StorageKey::Chats, "[]").await?;
    storage.remove(StorageKey::Chats).await?;

    assert!(storage.get(StorageKey::Chats).await?.is_none());
    return Ok(());
}
