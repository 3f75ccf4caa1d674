#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use unicode_width::UnicodeWidthStr;

use super::data_uri;
use super::Author;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    #[serde(alias = "isAI", default)]
    pub is_from_assistant: bool,
    #[serde(alias = "image", default)]
    pub image_data: Option<String>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            text: text.to_string().replace('\t', "  "),
            is_from_assistant: author == Author::Assistant,
            image_data: None,
        };
    }

    pub fn new_with_image(author: Author, text: &str, image_data: &str) -> Message {
        let mut message = Message::new(author, text);
        message.image_data = Some(image_data.to_string());
        return message;
    }

    pub fn author(&self) -> Author {
        if self.is_from_assistant {
            return Author::Assistant;
        }

        return Author::User;
    }

    pub fn has_image(&self) -> bool {
        return self.image_data.is_some();
    }

    /// Label shown in place of an inline image, such as `[image: image/png, 12.4 KB]`.
    pub fn image_label(&self) -> Option<String> {
        let image_data = self.image_data.as_ref()?;
        if let Some(summary) = data_uri::describe(image_data) {
            return Some(format!("[image: {summary}]"));
        }

        return Some("[image]".to_string());
    }

    pub fn text_lines(&self, line_max_width: usize) -> Vec<String> {
        let line_max_width = line_max_width.max(1);
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            lines.extend(wrap_line(full_line, line_max_width));
        }

        return lines;
    }

    pub fn image_lines(&self, line_max_width: usize) -> Vec<String> {
        if let Some(label) = self.image_label() {
            return wrap_line(&label, line_max_width.max(1));
        }

        return vec![];
    }
}

fn wrap_line(full_line: &str, line_max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    let mut char_count = 0;
    let mut current_line: Vec<String> = vec![];

    for word in split_long_words(full_line, line_max_width) {
        let word_width = word.width();
        if !current_line.is_empty() && word_width + char_count > line_max_width {
            lines.push(current_line.join(" ").trim_end().to_string());
            current_line = vec![];
            char_count = 0;
        }

        char_count += word_width + 1;
        current_line.push(word);
    }
    if !current_line.is_empty() {
        lines.push(current_line.join(" ").trim_end().to_string());
    }

    return lines;
}

/// Splits a line on spaces, breaking up any word wider than `max_width` so
/// nothing overflows a bubble.
fn split_long_words(line: &str, max_width: usize) -> Vec<String> {
    let mut words = vec![];
    for word in line.split(' ') {
        if word.width() <= max_width {
            words.push(word.to_string());
            continue;
        }

        let mut chunk = String::new();
        for c in word.chars() {
            let next = format!("{chunk}{c}");
            if next.width() > max_width && !chunk.is_empty() {
                words.push(chunk);
                chunk = c.to_string();
            } else {
                chunk = next;
            }
        }
        if !chunk.is_empty() {
            words.push(chunk);
        }
    }

    return words;
}
