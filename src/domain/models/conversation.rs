#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use serde::Deserialize as _;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

pub const PLACEHOLDER_TITLE: &str = "New Chat";
const TITLE_MAX_CHARS: usize = 30;

fn placeholder_title() -> String {
    return PLACEHOLDER_TITLE.to_string();
}

fn title_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = Option::<String>::deserialize(deserializer)?;
    return Ok(title.unwrap_or_else(placeholder_title));
}

/// Builds a conversation title from the first non-blank line of the first
/// user message.
pub fn title_from_text(text: &str) -> String {
    let line = text
        .lines()
        .find(|line| return !line.trim().is_empty())
        .unwrap_or_default()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");

    if line.chars().count() > TITLE_MAX_CHARS {
        let truncated = line.chars().take(TITLE_MAX_CHARS).collect::<String>();
        return format!("{truncated}...");
    }

    return line;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default = "placeholder_title", deserialize_with = "title_or_placeholder")]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: &str) -> Conversation {
        return Conversation {
            id: id.to_string(),
            title: placeholder_title(),
            messages: vec![],
        };
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            return PLACEHOLDER_TITLE;
        }

        return &self.title;
    }

    pub fn has_user_messages(&self) -> bool {
        return self.messages.iter().any(|m| return !m.is_from_assistant);
    }

    /// Appends a message, naming the conversation after its first user
    /// message. Returns true when the title changed.
    pub fn push(&mut self, message: Message) -> bool {
        let names_conversation = !message.is_from_assistant
            && !self.has_user_messages()
            && self.display_title() == PLACEHOLDER_TITLE;

        if names_conversation {
            self.title = title_from_text(&message.text);
        }
        self.messages.push(message);

        return names_conversation;
    }
}
