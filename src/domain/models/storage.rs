use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StorageName {
    File,
    Memory,
}

impl StorageName {
    pub fn parse(text: String) -> Option<StorageName> {
        return StorageName::iter().find(|e| return e.to_string() == text);
    }
}

/// Fixed keys of the key-value store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum StorageKey {
    #[strum(serialize = "groxai-chats")]
    Chats,
    #[strum(serialize = "groxai-active-chat")]
    ActiveChat,
    #[strum(serialize = "groxai-theme")]
    Theme,
    #[strum(serialize = "groxai-has-chatted")]
    HasChatted,
}

#[async_trait]
pub trait Storage {
    /// Returns the raw value stored for `key`, or `None` when it was never
    /// written.
    async fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replaces the value stored for `key`. Last write wins.
    async fn set(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: StorageKey) -> Result<()>;
}

pub type StorageBox = Box<dyn Storage + Send + Sync>;
