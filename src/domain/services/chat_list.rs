#[cfg(test)]
#[path = "chat_list_test.rs"]
mod tests;

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::Conversation;
use crate::domain::models::Palette;

pub const MENU_CONTROL: &str = "⋯";
pub const MENU_DELETE: &str = "Delete";

/// Projects the conversation list into sidebar rows, plus the row menu and the
/// delete confirmation. Rebuilt on every draw.
pub struct ChatList {}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut res = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width + 1 > max_width {
            break;
        }
        width += char_width;
        res.push(c);
    }
    res.push('…');

    return res;
}

impl ChatList {
    /// One row per conversation. The active row is highlighted, the selected
    /// row carries a `›` marker, and every row ends with the menu control.
    pub fn rows(
        conversations: &[Conversation],
        active_id: Option<&str>,
        selected: Option<usize>,
        width: usize,
        palette: Palette,
    ) -> Vec<Line<'static>> {
        // marker (2) + space before control (1) + control (1)
        let title_width = width.saturating_sub(4).max(1);

        return conversations
            .iter()
            .enumerate()
            .map(|(idx, conversation)| {
                let mut marker = "  ";
                if selected == Some(idx) {
                    marker = "› ";
                }

                let title = truncate_to_width(conversation.display_title(), title_width);
                let fill = " ".repeat(title_width.saturating_sub(title.width()));

                let mut style = Style::default().fg(palette.text);
                let mut control_style = Style::default().fg(palette.muted);
                if active_id == Some(conversation.id.as_str()) {
                    style = Style::default()
                        .fg(palette.selection_fg)
                        .bg(palette.selection_bg)
                        .add_modifier(Modifier::BOLD);
                    control_style = style;
                }

                return Line::from(vec![
                    Span::styled(marker.to_string(), style),
                    Span::styled(format!("{title}{fill} "), style),
                    Span::styled(MENU_CONTROL.to_string(), control_style),
                ]);
            })
            .collect();
    }

    pub fn menu_lines(palette: Palette) -> Vec<Line<'static>> {
        return vec![Line::from(vec![Span::styled(
            format!(" {MENU_DELETE} "),
            Style::default()
                .fg(palette.danger)
                .add_modifier(Modifier::BOLD),
        )])];
    }

    pub fn confirm_lines(title: &str, palette: Palette) -> Vec<Line<'static>> {
        return vec![
            Line::from(vec![Span::styled(
                format!("This will delete \"{title}\""),
                Style::default().fg(palette.text),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] Delete".to_string(),
                    Style::default()
                        .fg(palette.danger)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("[n] Cancel".to_string(), Style::default().fg(palette.muted)),
            ]),
        ];
    }

    /// Scroll offset that keeps the anchor row inside the visible rows.
    pub fn scroll_offset(anchor: usize, visible_rows: u16) -> u16 {
        let anchor = u16::try_from(anchor).unwrap_or(u16::MAX);
        return anchor.saturating_sub(visible_rows.saturating_sub(1));
    }

    /// Area for the row menu, directly under the given row of the sidebar.
    pub fn menu_rect(sidebar: Rect, row: u16) -> Rect {
        let width = (MENU_DELETE.width() as u16 + 4).min(sidebar.width);
        let x = (sidebar.x + sidebar.width).saturating_sub(width);
        let max_y = (sidebar.y + sidebar.height).saturating_sub(3);
        let y = (sidebar.y + row + 2).min(max_y);

        return Rect::new(x, y, width, 3.min(sidebar.height));
    }

    pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;

        return Rect::new(x, y, width, height);
    }
}
