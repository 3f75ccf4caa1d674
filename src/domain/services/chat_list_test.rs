use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::Line;

use super::ChatList;
use crate::domain::models::Conversation;
use crate::domain::models::ThemeName;

fn line_text(line: &Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| return span.content.to_string())
        .collect::<Vec<String>>()
        .join("");
}

fn conversations() -> Vec<Conversation> {
    let mut first = Conversation::new("2");
    first.title = "Tell me a joke".to_string();
    let second = Conversation::new("1");

    return vec![first, second];
}

mod rows {
    use super::*;

    #[test]
    fn it_renders_one_row_per_conversation() {
        let palette = ThemeName::Light.palette();
        let lines = ChatList::rows(&conversations(), Some("2"), None, 24, palette);

        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "  Tell me a joke       ⋯");
        assert_eq!(line_text(&lines[1]), "  New Chat             ⋯");
    }

    #[test]
    fn it_highlights_active_row() {
        let palette = ThemeName::Light.palette();
        let lines = ChatList::rows(&conversations(), Some("1"), None, 24, palette);

        assert_eq!(lines[1].spans[1].style.bg, Some(palette.selection_bg));
        assert!(lines[1].spans[1]
            .style
            .add_modifier
            .contains(Modifier::BOLD));
        assert_eq!(lines[0].spans[1].style.bg, None);
    }

    #[test]
    fn it_marks_selected_row() {
        let palette = ThemeName::Dark.palette();
        let lines = ChatList::rows(&conversations(), Some("2"), Some(1), 24, palette);

        assert!(line_text(&lines[1]).starts_with("› New Chat"));
        assert!(line_text(&lines[0]).starts_with("  Tell"));
    }

    #[test]
    fn it_truncates_long_titles() {
        let palette = ThemeName::Light.palette();
        let lines = ChatList::rows(&conversations(), None, None, 12, palette);

        assert_eq!(line_text(&lines[0]), "  Tell me… ⋯");
    }
}

#[test]
fn it_names_conversation_in_confirmation() {
    let lines = ChatList::confirm_lines("Tell me a joke", ThemeName::Light.palette());

    assert_eq!(line_text(&lines[0]), "This will delete \"Tell me a joke\"");
    assert_eq!(line_text(&lines[2]), "[y] Delete  [n] Cancel");
}

#[test]
fn it_renders_delete_menu() {
    let lines = ChatList::menu_lines(ThemeName::Light.palette());
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(&lines[0]).trim(), "Delete");
}

#[test]
fn it_centers_rect() {
    let area = Rect::new(0, 0, 100, 40);
    let rect = ChatList::centered_rect(50, 10, area);
    assert_eq!(rect, Rect::new(25, 15, 50, 10));

    let clamped = ChatList::centered_rect(200, 80, area);
    assert_eq!(clamped, area);
}

#[test]
fn it_places_menu_under_row() {
    let sidebar = Rect::new(0, 0, 30, 20);
    let rect = ChatList::menu_rect(sidebar, 2);
    assert_eq!(rect, Rect::new(20, 4, 10, 3));
}

#[test]
fn it_scrolls_to_keep_anchor_visible() {
    assert_eq!(ChatList::scroll_offset(0, 5), 0);
    assert_eq!(ChatList::scroll_offset(4, 5), 0);
    assert_eq!(ChatList::scroll_offset(7, 5), 3);
    assert_eq!(ChatList::scroll_offset(3, 0), 3);
}
