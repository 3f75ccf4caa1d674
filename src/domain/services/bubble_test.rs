use ratatui::style::Modifier;
use unicode_width::UnicodeWidthStr;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::ThemeName;

fn line_strings(message: &Message, alignment: BubbleAlignment, width: usize) -> Vec<String> {
    let palette = ThemeName::Light.palette();
    return Bubble::new(message, alignment, width, palette)
        .as_lines()
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("");
        })
        .collect();
}

fn create_lines(alignment: BubbleAlignment, width: usize, text: &str) -> String {
    let message = Message::new(Author::Assistant, text);
    return line_strings(&message, alignment, width).join("\n");
}

#[test]
fn it_creates_assistant_text() {
    let lines_str = create_lines(BubbleAlignment::Left, 50, "Hi there!");
    insta::assert_snapshot!(lines_str, @r###"
    ╭GroxAI─────╮
    │ Hi there! │
    ╰───────────╯
    "###);
}

#[test]
fn it_creates_assistant_text_long() {
    let lines_str = create_lines(
        BubbleAlignment::Left,
        30,
        "Hi there! How are you doing today?",
    );
    insta::assert_snapshot!(lines_str, @r###"
    ╭GroxAI─────────────────╮
    │ Hi there! How are you │
    │ doing today?          │
    ╰───────────────────────╯
    "###);
}

#[test]
fn it_creates_image_label_line() {
    let message = Message::new_with_image(
        Author::Assistant,
        "Nice photo!",
        "data:image/png;base64,aGVsbG8=",
    );
    let lines_str = line_strings(&message, BubbleAlignment::Left, 50).join("\n");
    insta::assert_snapshot!(lines_str, @r###"
    ╭GroxAI───────────────────╮
    │ Nice photo!             │
    │ [image: image/png, 5 B] │
    ╰─────────────────────────╯
    "###);
}

#[test]
fn it_styles_image_label_italic() {
    let message = Message::new_with_image(
        Author::Assistant,
        "Nice photo!",
        "data:image/png;base64,aGVsbG8=",
    );
    let palette = ThemeName::Light.palette();
    let lines = Bubble::new(&message, BubbleAlignment::Left, 50, palette).as_lines();

    let image_span = &lines[2].spans[1];
    assert_eq!(image_span.content, "[image: image/png, 5 B]");
    assert!(image_span.style.add_modifier.contains(Modifier::ITALIC));
    assert_eq!(image_span.style.fg, Some(palette.muted));
}

#[test]
fn it_right_aligns_user_bubbles() {
    let message = Message::new(Author::User, "Hello");
    let lines = line_strings(&message, BubbleAlignment::Right, 40);

    assert_eq!(lines.len(), 3);
    for line in lines.iter() {
        assert_eq!(line.width(), 40);
        assert!(line.starts_with(' '));
    }
    assert!(lines[1].contains("│ Hello"));
    assert!(lines[1].ends_with(" │"));
}

#[test]
fn it_never_exceeds_window_width() {
    let message = Message::new(
        Author::Assistant,
        "Supercalifragilisticexpialidocious is a remarkably long word to squeeze in",
    );
    let lines = line_strings(&message, BubbleAlignment::Left, 20);

    for line in lines.iter() {
        assert!(line.width() <= 20, "line too wide: {line}");
    }
}
