//! Image payload models shared by staging, upload and download.

use bytes::Bytes;

/// Fallback content type when a response or file does not declare one.
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Raw image bytes plus the content type they should be sent with.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub data: Bytes,
    pub content_type: String,
}

impl ImagePayload {
    pub fn new(data: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();
        Self {
            data: data.into(),
            content_type,
        }
    }

    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An image picked by the user and held in memory until the pipeline runs.
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl StagedImage {
    pub fn into_payload(self) -> ImagePayload {
        ImagePayload::new(self.data, Some(&self.content_type))
    }
}

/// File extension for a content type, `jpg` when unknown.
pub fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/avif" => "avif",
        "image/heic" | "image/heif" => "heic",
        _ => "jpg",
    }
}
