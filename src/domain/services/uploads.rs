#[cfg(test)]
#[path = "uploads_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;

use crate::domain::models::data_uri;

#[derive(Debug, PartialEq, Eq)]
pub enum Upload {
    Image { media_type: String, data_uri: String },
    Rejected { media_type: String },
}

pub struct Uploads {}

impl Uploads {
    pub fn resolve_path(raw: &str) -> path::PathBuf {
        let trimmed = raw.trim().trim_matches(|c| return c == '"' || c == '\'');
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }

        return path::PathBuf::from(trimmed);
    }

    pub fn media_type(file_path: &path::Path) -> String {
        return mime_guess::from_path(file_path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
    }

    pub fn is_image(media_type: &str) -> bool {
        return media_type.starts_with("image/");
    }

    /// Reads an image fully into a data URI. Files that are not images are
    /// rejected before any bytes are read.
    pub async fn read(raw_path: &str) -> Result<Upload> {
        let file_path = Uploads::resolve_path(raw_path);
        let media_type = Uploads::media_type(&file_path);
        if !Uploads::is_image(&media_type) {
            return Ok(Upload::Rejected { media_type });
        }

        let bytes = fs::read(&file_path).await?;
        tracing::debug!(
            path = file_path.to_string_lossy().to_string(),
            media_type,
            bytes = bytes.len(),
            "read upload"
        );

        return Ok(Upload::Image {
            data_uri: data_uri::encode(&media_type, &bytes),
            media_type,
        });
    }
}
