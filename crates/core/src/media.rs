//! Media content-type and upload-size rules.
//!
//! A display only knows how to render images and videos; everything else
//! is rejected at the upload boundary and skipped defensively at render
//! time. Size ceilings differ per kind.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// MIME prefix for image content.
pub const MIME_PREFIX_IMAGE: &str = "image/";

/// MIME prefix for video content.
pub const MIME_PREFIX_VIDEO: &str = "video/";

/// Maximum accepted image upload size (10 MB).
pub const MAX_IMAGE_BYTES: i64 = 10 * 1024 * 1024;

/// Maximum accepted video upload size (100 MB).
pub const MAX_VIDEO_BYTES: i64 = 100 * 1024 * 1024;

/* --------------------------------------------------------------------------
Media kind
-------------------------------------------------------------------------- */

/// The two renderable media kinds, discriminated by MIME prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME content type, or `None` for unsupported types.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        if content_type.starts_with(MIME_PREFIX_IMAGE) {
            Some(MediaKind::Image)
        } else if content_type.starts_with(MIME_PREFIX_VIDEO) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Upload size ceiling for this kind, in bytes.
    pub fn max_bytes(self) -> i64 {
        match self {
            MediaKind::Image => MAX_IMAGE_BYTES,
            MediaKind::Video => MAX_VIDEO_BYTES,
        }
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Whether a content type is renderable at all.
pub fn is_supported_type(content_type: &str) -> bool {
    MediaKind::from_mime(content_type).is_some()
}

/// Validate an upload's content type and size.
///
/// Returns the classified [`MediaKind`] on success so callers don't have
/// to re-derive it.
pub fn validate_upload(content_type: &str, size_bytes: i64) -> Result<MediaKind, CoreError> {
    let kind = MediaKind::from_mime(content_type).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unsupported content type '{content_type}'. Only image/* and video/* are accepted"
        ))
    })?;

    if size_bytes < 0 {
        return Err(CoreError::Validation(
            "Size must not be negative".to_string(),
        ));
    }
    if size_bytes > kind.max_bytes() {
        return Err(CoreError::Validation(format!(
            "File of {size_bytes} bytes exceeds the {} byte limit for {content_type}",
            kind.max_bytes()
        )));
    }

    Ok(kind)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    // -- MediaKind::from_mime --

    #[test]
    fn image_types_classified() {
        assert_eq!(MediaKind::from_mime("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_mime("image/jpeg"), Some(MediaKind::Image));
    }

    #[test]
    fn video_types_classified() {
        assert_eq!(MediaKind::from_mime("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_mime("video/webm"), Some(MediaKind::Video));
    }

    #[test]
    fn other_types_unsupported() {
        assert_eq!(MediaKind::from_mime("application/pdf"), None);
        assert_eq!(MediaKind::from_mime("text/html"), None);
        assert_eq!(MediaKind::from_mime(""), None);
        // A bare "image" without the slash is not an image MIME type.
        assert_eq!(MediaKind::from_mime("image"), None);
    }

    // -- validate_upload --

    #[test]
    fn image_within_limit_accepted() {
        let kind = validate_upload("image/png", MAX_IMAGE_BYTES).unwrap();
        assert_eq!(kind, MediaKind::Image);
    }

    #[test]
    fn image_over_limit_rejected() {
        let result = validate_upload("image/png", MAX_IMAGE_BYTES + 1);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("exceeds"));
    }

    #[test]
    fn video_gets_larger_limit() {
        // Too big for an image, fine for a video.
        let size = MAX_IMAGE_BYTES + 1;
        assert!(validate_upload("video/mp4", size).is_ok());
        assert!(validate_upload("video/mp4", MAX_VIDEO_BYTES + 1).is_err());
    }

    #[test]
    fn unsupported_type_rejected_before_size() {
        let result = validate_upload("application/zip", 1);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Unsupported content type"));
    }

    #[test]
    fn negative_size_rejected() {
        assert!(validate_upload("image/png", -1).is_err());
    }
}
