/// First bytes of a 1x1 PNG. Enough for anything that only looks at the
/// extension and the byte count.
pub fn png_fixture() -> &'static [u8] {
    return &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1f, 0x15, 0xc4, 0x89,
    ];
}

/// Chats blob as written by the browser build, using its `isAI` and `image`
/// field names.
pub fn legacy_chats_fixture() -> &'static str {
    return r#"
[
  {
    "id": "1700000000002",
    "title": "Tell me a joke",
    "messages": [
      { "text": "Tell me a joke", "isAI": false, "image": null },
      { "text": "Oops, my circuits glitched! 😅 Try rephrasing that one.", "isAI": true, "image": null }
    ]
  },
  {
    "id": "1700000000001",
    "title": "Uploaded a photo!",
    "messages": [
      { "text": "Uploaded a photo!", "isAI": false, "image": "data:image/png;base64,iVBORw0KGgo=" }
    ]
  }
]
"#
    .trim();
}

pub fn long_message_fixture() -> &'static str {
    return "This is a really long line that pushes the boundaries of the chat window, resulting in a bubble where the line is wrapped to the next line. Cool right?";
}
