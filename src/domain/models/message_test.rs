use anyhow::Result;

use super::Author;
use super::Message;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Assistant, "Hi there!");
    assert_eq!(msg.author(), Author::Assistant);
    assert!(msg.is_from_assistant);
    assert_eq!(msg.text, "Hi there!".to_string());
    assert!(msg.image_data.is_none());
}

#[test]
fn it_executes_new_for_user() {
    let msg = Message::new(Author::User, "Hello");
    assert_eq!(msg.author(), Author::User);
    assert!(!msg.is_from_assistant);
}

#[test]
fn it_executes_new_replacing_tabs() {
    let msg = Message::new(Author::Assistant, "\t\tHi there!");
    assert_eq!(msg.text, "    Hi there!".to_string());
}

#[test]
fn it_executes_new_with_image() {
    let msg = Message::new_with_image(
        Author::User,
        "Uploaded a photo!",
        "data:image/png;base64,aGVsbG8=",
    );
    assert!(msg.has_image());
    assert_eq!(msg.image_label().unwrap(), "[image: image/png, 5 B]");
}

#[test]
fn it_labels_unknown_image_data() {
    let msg = Message::new_with_image(Author::User, "Uploaded a photo!", "not-a-uri");
    assert_eq!(msg.image_label().unwrap(), "[image]");
}

#[test]
fn it_wraps_lines() {
    let msg = Message::new(Author::User, "Hi there! How are you");
    assert_eq!(msg.text_lines(10), vec!["Hi there!", "How are", "you"]);
}

#[test]
fn it_splits_words_longer_than_a_line() {
    let msg = Message::new(Author::User, "abcdefghij");
    assert_eq!(msg.text_lines(4), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn it_keeps_blank_lines() {
    let msg = Message::new(Author::User, "one\n\ntwo");
    assert_eq!(msg.text_lines(10), vec!["one", " ", "two"]);
}

#[test]
fn it_wraps_image_label_separately() {
    let msg = Message::new_with_image(Author::User, "Look", "data:image/png;base64,aGVsbG8=");
    assert_eq!(msg.text_lines(40), vec!["Look"]);
    assert_eq!(msg.image_lines(40), vec!["[image: image/png, 5 B]"]);
}

#[test]
fn it_serializes_camel_case() -> Result<()> {
    let msg = Message::new(Author::User, "Hello");
    let json = serde_json::to_string(&msg)?;
    insta::assert_snapshot!(json, @r###"{"text":"Hello","isFromAssistant":false,"imageData":null}"###);

    return Ok(());
}

#[test]
fn it_deserializes_legacy_field_names() -> Result<()> {
    let msg: Message = serde_json::from_str(
        r#"{ "text": "Nice photo!", "isAI": true, "image": "data:image/png;base64,aGVsbG8=" }"#,
    )?;
    assert!(msg.is_from_assistant);
    assert_eq!(
        msg.image_data,
        Some("data:image/png;base64,aGVsbG8=".to_string())
    );

    return Ok(());
}

#[test]
fn it_deserializes_missing_optional_fields() -> Result<()> {
    let msg: Message = serde_json::from_str(r#"{ "text": "Hello" }"#)?;
    assert!(!msg.is_from_assistant);
    assert!(msg.image_data.is_none());

    return Ok(());
}
