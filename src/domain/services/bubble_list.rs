#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use ratatui::text::Line;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::Palette;

const TYPING_FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

/// Projects a message thread into bubble lines. Rebuilt on every draw.
pub struct BubbleList {}

impl BubbleList {
    pub fn typing_frame(tick: usize) -> &'static str {
        return TYPING_FRAMES[tick % TYPING_FRAMES.len()];
    }

    pub fn lines(
        messages: &[Message],
        typing: Option<&str>,
        line_width: usize,
        palette: Palette,
    ) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = messages
            .iter()
            .flat_map(|message| {
                let mut align = BubbleAlignment::Left;
                if message.author() == Author::User {
                    align = BubbleAlignment::Right;
                }

                return Bubble::new(message, align, line_width, palette).as_lines();
            })
            .collect();

        if let Some(frame) = typing {
            let indicator = Message::new(Author::Assistant, frame);
            lines.extend(
                Bubble::new(&indicator, BubbleAlignment::Left, line_width, palette).as_lines(),
            );
        }

        return lines;
    }
}
