//! Staging of local image files.
//!
//! A picked or dropped file is read into memory and accepted only if it is an
//! image. Content type comes from the file's magic bytes, falling back to its
//! extension.

use std::path::Path;

use bytes::Bytes;

use crate::error::AppError;
use crate::models::image::StagedImage;

/// Read `path` and stage it for the file pipeline.
pub async fn stage_file(path: impl AsRef<Path>) -> crate::error::Result<StagedImage> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::InvalidInput(format!("Not a file: {}", path.display())))?
        .to_string();

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    if data.is_empty() {
        return Err(AppError::InvalidInput(format!("{} is empty", file_name)));
    }

    let content_type = detect_content_type(&data, path).ok_or_else(|| {
        AppError::InvalidInput(format!("{} is not an image", file_name))
    })?;

    log::debug!("Staged {} ({} bytes, {})", file_name, data.len(), content_type);
    Ok(StagedImage {
        file_name,
        content_type,
        data: Bytes::from(data),
    })
}

/// `image/*` type of `data`, or `None` if it does not look like an image.
pub fn detect_content_type(data: &[u8], path: &Path) -> Option<String> {
    if let Some(kind) = infer::get(data) {
        let mime = kind.mime_type();
        return mime.starts_with("image/").then(|| mime.to_string());
    }
    guess_from_extension(path).map(str::to_string)
}

fn guess_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        "heic" | "heif" => Some("image/heic"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
    const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

    #[tokio::test]
    async fn test_stage_png_by_magic_bytes() {
        let dir = tempfile::tempdir().unwrap();
        // Misleading extension: magic bytes win.
        let path = dir.path().join("picture.dat");
        fs::write(&path, PNG_HEADER).unwrap();

        let staged = stage_file(&path).await.unwrap();
        assert_eq!(staged.file_name, "picture.dat");
        assert_eq!(staged.content_type, "image/png");
        assert_eq!(staged.data.as_ref(), PNG_HEADER);
    }

    #[tokio::test]
    async fn test_stage_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let mut data = JPEG_HEADER.to_vec();
        data.resize(10 * 1024, 0);
        fs::write(&path, &data).unwrap();

        let staged = stage_file(&path).await.unwrap();
        assert_eq!(staged.content_type, "image/jpeg");
        assert_eq!(staged.data.len(), 10 * 1024);
    }

    #[tokio::test]
    async fn test_extension_fallback_for_unsniffable_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.JPEG");
        fs::write(&path, "not really sniffable").unwrap();

        let staged = stage_file(&path).await.unwrap();
        assert_eq!(staged.content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        match stage_file(&path).await {
            Err(AppError::InvalidInput(msg)) => assert!(msg.contains("not an image"), "{}", msg),
            other => panic!("Expected AppError::InvalidInput, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejects_sniffed_non_image_even_with_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.png");
        fs::write(&path, [b'P', b'K', 0x03, 0x04, 0, 0, 0, 0]).unwrap();
        assert!(stage_file(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        fs::write(&path, b"").unwrap();
        assert!(matches!(
            stage_file(&path).await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = stage_file("/nonexistent/path/photo.jpg").await;
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
