//! Image fields keep the picture inline as a base64 data URL

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

pub const ALLOWED_IMAGE_TYPES: [&str; 5] = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Unsupported image type `{0}`. Use JPEG, PNG, GIF or WebP")]
    UnsupportedType(String),
    #[error("Image is too large ({size} bytes, at most 5 MB)")]
    TooLarge { size: u64 },
    #[error("Could not read the file: {0}")]
    Read(String),
}

pub fn check_image(mime: &str, size: u64) -> Result<(), ImageError> {
    let mime = mime.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&mime.as_str()) {
        return Err(ImageError::UnsupportedType(mime));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge { size });
    }
    Ok(())
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Bare base64 payload of a data URL; other strings pass through
pub fn strip_data_url_prefix(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }
    value
        .split_once(";base64,")
        .map(|(_, payload)| payload)
        .unwrap_or(value)
}

/// `src` for showing a stored picture. Stored records hold bare base64, a
/// freshly picked file is already a data URL.
pub fn preview_src(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() || value.starts_with("data:") || value.starts_with("http") || value.starts_with('/') {
        value.to_string()
    } else {
        format!("data:image/png;base64,{}", value)
    }
}

/// Validate and inline a picked file
pub async fn read_image_file(file: web_sys::File) -> Result<String, ImageError> {
    use wasm_bindgen_futures::JsFuture;

    let mime = file.type_();
    check_image(&mime, file.size() as u64)?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ImageError::Read(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(to_data_url(&mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_src() {
        assert_eq!(preview_src("iVBORw0KGgo="), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(preview_src("data:image/gif;base64,R0lG"), "data:image/gif;base64,R0lG");
        assert_eq!(preview_src("/uploads/tee.png"), "/uploads/tee.png");
        assert_eq!(preview_src(""), "");
    }

    #[test]
    fn test_allow_list() {
        assert_eq!(check_image("image/png", 1024), Ok(()));
        assert_eq!(check_image("IMAGE/JPEG", 1024), Ok(()));
        assert_eq!(
            check_image("image/svg+xml", 10),
            Err(ImageError::UnsupportedType("image/svg+xml".into()))
        );
    }

    #[test]
    fn test_size_ceiling() {
        assert_eq!(check_image("image/webp", MAX_IMAGE_BYTES), Ok(()));
        assert_eq!(
            check_image("image/webp", MAX_IMAGE_BYTES + 1),
            Err(ImageError::TooLarge { size: MAX_IMAGE_BYTES + 1 })
        );
    }

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url("image/png", b"hi");
        assert_eq!(url, "data:image/png;base64,aGk=");
        assert_eq!(strip_data_url_prefix(&url), "aGk=");
        assert_eq!(strip_data_url_prefix("aGk="), "aGk=");
        assert_eq!(strip_data_url_prefix("https://cdn/x.png"), "https://cdn/x.png");
    }
}
