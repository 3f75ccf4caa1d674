#[cfg(test)]
#[path = "chat_store_test.rs"]
mod tests;

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;

use crate::domain::models::Conversation;
use crate::domain::models::Message;
use crate::domain::models::StorageBox;
use crate::domain::models::StorageKey;
use crate::domain::models::ThemeName;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("No conversation found for id {0}")]
    NotFound(String),
}

/// Owns every conversation and the active pointer, and mirrors them into
/// storage after each mutation. Once loaded there is always exactly one
/// active conversation.
pub struct ChatStore {
    storage: StorageBox,
    conversations: Vec<Conversation>,
    active_id: Option<String>,
    last_id: i64,
    theme: Option<ThemeName>,
    has_chatted: bool,
}

async fn read_value(storage: &StorageBox, key: StorageKey) -> Option<String> {
    match storage.get(key).await {
        Ok(val) => return val,
        Err(err) => {
            tracing::warn!(key = key.to_string(), err = ?err, "unable to read from storage");
            return None;
        }
    }
}

impl ChatStore {
    pub async fn load(storage: StorageBox) -> ChatStore {
        let conversations = ChatStore::read_conversations(&storage).await;
        let active_id = read_value(&storage, StorageKey::ActiveChat).await;
        let theme = read_value(&storage, StorageKey::Theme)
            .await
            .and_then(|val| return ThemeName::parse(val.trim()));
        let has_chatted = read_value(&storage, StorageKey::HasChatted)
            .await
            .map(|val| return val.trim() == "true")
            .unwrap_or(false);
        let last_id = conversations
            .iter()
            .filter_map(|c| return c.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        let mut store = ChatStore {
            storage,
            conversations,
            active_id,
            last_id,
            theme,
            has_chatted,
        };

        if store.active().is_none() {
            store.active_id = None;
            store.create_conversation().await;
        }

        tracing::info!(
            conversations = store.conversations.len(),
            active_id = ?store.active_id,
            "loaded chats"
        );

        return store;
    }

    /// Reads the persisted conversations without touching the active pointer.
    /// Missing or malformed data reads as an empty list.
    pub async fn read_conversations(storage: &StorageBox) -> Vec<Conversation> {
        let payload = match read_value(storage, StorageKey::Chats).await {
            Some(payload) => payload,
            None => return vec![],
        };

        if payload.trim().is_empty() {
            return vec![];
        }

        match serde_json::from_str::<Vec<Conversation>>(&payload) {
            Ok(conversations) => return conversations,
            Err(err) => {
                tracing::warn!(err = ?err, "stored chats are malformed, starting fresh");
                return vec![];
            }
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        return &self.conversations;
    }

    pub fn active_id(&self) -> Option<&str> {
        return self.active_id.as_deref();
    }

    pub fn active(&self) -> Option<&Conversation> {
        let active_id = self.active_id.as_deref()?;
        return self.get(active_id);
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        return self.conversations.iter().find(|c| return c.id == id);
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        return self.conversations.iter().position(|c| return c.id == id);
    }

    /// Ids are millisecond timestamps, bumped past every id issued or loaded
    /// so a deleted conversation's id is never handed out again.
    fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_id = now.max(self.last_id.saturating_add(1));
        return self.last_id.to_string();
    }

    pub async fn create_conversation(&mut self) -> String {
        let id = self.next_id();
        self.conversations.insert(0, Conversation::new(&id));
        self.active_id = Some(id.clone());
        tracing::debug!(id, "created conversation");

        self.persist().await;
        return id;
    }

    pub async fn switch_active(&mut self, id: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.active_id = Some(id.to_string());
        tracing::debug!(id, "switched conversation");

        self.persist().await;
        return Ok(());
    }

    /// Removes a conversation. Removing the active one starts a fresh
    /// conversation in its place. Returns false when nothing matched.
    pub async fn delete_conversation(&mut self, id: &str) -> bool {
        let idx = match self.index_of(id) {
            Some(idx) => idx,
            None => return false,
        };

        self.conversations.remove(idx);
        tracing::debug!(id, "deleted conversation");

        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
            self.create_conversation().await;
        } else {
            self.persist().await;
        }

        return true;
    }

    /// Appends to the given conversation. Returns true when the message named
    /// the conversation.
    pub async fn append_message(
        &mut self,
        conversation_id: &str,
        message: Message,
    ) -> Result<bool, StoreError> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| return c.id == conversation_id)
            .ok_or_else(|| return StoreError::NotFound(conversation_id.to_string()))?;

        let title_changed = conversation.push(message);
        if title_changed {
            tracing::debug!(id = conversation_id, title = conversation.title, "named conversation");
        }

        self.persist().await;
        return Ok(title_changed);
    }

    pub async fn clear_all(&mut self) {
        self.conversations.clear();
        self.active_id = None;
        self.create_conversation().await;
    }

    pub fn theme(&self) -> Option<ThemeName> {
        return self.theme;
    }

    pub async fn set_theme(&mut self, theme: ThemeName) {
        self.theme = Some(theme);
        if let Err(err) = self
            .storage
            .set(StorageKey::Theme, &theme.to_string())
            .await
        {
            tracing::error!(err = ?err, "failed to persist theme");
        }
    }

    pub fn has_chatted(&self) -> bool {
        return self.has_chatted;
    }

    pub async fn mark_chatted(&mut self) {
        if self.has_chatted {
            return;
        }

        self.has_chatted = true;
        if let Err(err) = self.storage.set(StorageKey::HasChatted, "true").await {
            tracing::error!(err = ?err, "failed to persist chat flag");
        }
    }

    pub async fn persist_all(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.conversations)?;
        self.storage.set(StorageKey::Chats, &payload).await?;

        if let Some(active_id) = &self.active_id {
            self.storage.set(StorageKey::ActiveChat, active_id).await?;
        } else {
            self.storage.remove(StorageKey::ActiveChat).await?;
        }

        return Ok(());
    }

    async fn persist(&self) {
        if let Err(err) = self.persist_all().await {
            tracing::error!(err = ?err, "failed to persist chats");
        }
    }
}
