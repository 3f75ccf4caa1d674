use test_utils::png_fixture;

use super::describe;
use super::encode;

#[test]
fn it_encodes_base64_data_uri() {
    let uri = encode("image/png", b"hello");
    assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
}

#[test]
fn it_describes_encoded_payload_size() {
    let uri = encode("image/png", png_fixture());
    let summary = describe(&uri).unwrap();

    assert_eq!(summary.media_type, "image/png");
    assert_eq!(summary.byte_len, png_fixture().len());
}

#[test]
fn it_describes_padded_payload() {
    let summary = describe("data:image/gif;base64,aGVsbG8=").unwrap();
    assert_eq!(summary.byte_len, 5);
    assert_eq!(summary.to_string(), "image/gif, 5 B");
}

#[test]
fn it_formats_kilobytes() {
    let uri = encode("image/jpeg", &vec![0; 2048]);
    let summary = describe(&uri).unwrap();
    assert_eq!(summary.to_string(), "image/jpeg, 2.0 KB");
}

#[test]
fn it_rejects_non_data_uris() {
    assert!(describe("https://example.com/cat.png").is_none());
    assert!(describe("data:;base64,aGVsbG8=").is_none());
    assert!(describe("data:image/png").is_none());
}
