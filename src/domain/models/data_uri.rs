#[cfg(test)]
#[path = "data_uri_test.rs"]
mod tests;

use std::fmt;

use base64::engine::general_purpose;
use base64::Engine;

/// Media type and decoded payload size of a `data:` URI, used to label inline
/// images without decoding them.
#[derive(Debug, PartialEq, Eq)]
pub struct DataUriSummary {
    pub media_type: String,
    pub byte_len: usize,
}

impl fmt::Display for DataUriSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.byte_len as f64;
        if self.byte_len < 1024 {
            return write!(f, "{}, {} B", self.media_type, self.byte_len);
        }
        if self.byte_len < 1024 * 1024 {
            return write!(f, "{}, {:.1} KB", self.media_type, size / 1024.0);
        }

        return write!(f, "{}, {:.1} MB", self.media_type, size / (1024.0 * 1024.0));
    }
}

pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    let payload = general_purpose::STANDARD.encode(bytes);
    return format!("data:{media_type};base64,{payload}");
}

pub fn describe(uri: &str) -> Option<DataUriSummary> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.split(';').next().unwrap_or("");
    if media_type.is_empty() {
        return None;
    }

    let mut byte_len = payload.len();
    if header.ends_with(";base64") {
        let padding = payload.chars().rev().take_while(|c| return *c == '=').count();
        byte_len = (payload.len() / 4 * 3).saturating_sub(padding);
    }

    return Some(DataUriSummary {
        media_type: media_type.to_string(),
        byte_len,
    });
}
