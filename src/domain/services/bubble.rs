#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::Palette;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    palette: Palette,
}

pub struct BubbleConfig {
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        palette: Palette,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
            palette,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // left border + left padding + (text, not counted) + right padding + right border +
            // one spare column.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let text_lines = self.message.text_lines(max_line_length);
        let image_lines = self.message.image_lines(max_line_length);
        let username = self.message.author().to_string();

        let inner_width = text_lines
            .iter()
            .chain(image_lines.iter())
            .map(|line| return line.width())
            .chain([username.width()])
            .max()
            .unwrap_or(0);

        let text_style = Style::default().fg(self.palette.text);
        let image_style = Style::default()
            .fg(self.palette.muted)
            .add_modifier(Modifier::ITALIC);

        let mut lines = vec![self.border_line(self.top_bar(&username, inner_width), inner_width)];
        for line in text_lines {
            lines.push(self.content_line(line, inner_width, text_style));
        }
        for line in image_lines {
            lines.push(self.content_line(line, inner_width, image_style));
        }
        lines.push(self.border_line(format!("╰{}╯", "─".repeat(inner_width + 2)), inner_width));

        return lines;
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        return self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(1);
    }

    fn top_bar(&self, username: &str, inner_width: usize) -> String {
        let fill = (inner_width + 2).saturating_sub(username.width());
        return format!("╭{username}{}╮", "─".repeat(fill));
    }

    fn outer_padding(&self, inner_width: usize) -> Option<Span<'static>> {
        if self.alignment == BubbleAlignment::Left {
            return None;
        }

        let bubble_width = inner_width + 4;
        let padding = self.window_max_width.saturating_sub(bubble_width);
        return Some(Span::from(" ".repeat(padding)));
    }

    fn border_style(&self) -> Style {
        if self.message.author() == Author::User {
            return Style::default().fg(self.palette.user);
        }

        return Style::default().fg(self.palette.assistant);
    }

    fn border_line(&self, text: String, inner_width: usize) -> Line<'static> {
        let mut spans = vec![];
        if let Some(padding) = self.outer_padding(inner_width) {
            spans.push(padding);
        }
        spans.push(Span::styled(text, self.border_style()));

        return Line::from(spans);
    }

    fn content_line(&self, text: String, inner_width: usize, style: Style) -> Line<'static> {
        let fill = " ".repeat(inner_width.saturating_sub(text.width()));

        let mut spans = vec![];
        if let Some(padding) = self.outer_padding(inner_width) {
            spans.push(padding);
        }
        spans.push(Span::styled("│ ", self.border_style()));
        spans.push(Span::styled(text, style));
        spans.push(Span::styled(format!("{fill} │"), self.border_style()));

        return Line::from(spans);
    }
}
