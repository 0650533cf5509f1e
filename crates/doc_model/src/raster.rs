//! Raster image format detection
//!
//! Signature images arrive as base64 data URIs from the signing
//! collaborator. Only payloads that begin with a recognized raster
//! signature are embedded into exported files.

use serde::{Deserialize, Serialize};

/// Raster formats accepted for signature images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Gif,
    Unknown,
}

impl RasterFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // GIF: 47 49 46 38
        if data.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
            return Self::Gif;
        }

        Self::Unknown
    }

    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Unknown => "bin",
        }
    }

    /// Whether the format may be embedded into exported files
    pub fn is_embeddable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_header_is_recognized() {
        let data = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(RasterFormat::from_bytes(&data), RasterFormat::Png);
        assert!(RasterFormat::from_bytes(&data).is_embeddable());
    }

    #[test]
    fn jpeg_header_is_recognized() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        assert_eq!(RasterFormat::from_bytes(&data), RasterFormat::Jpeg);
    }

    #[test]
    fn truncated_or_foreign_bytes_are_unknown() {
        assert_eq!(RasterFormat::from_bytes(&[0x89, 0x50]), RasterFormat::Unknown);
        assert_eq!(
            RasterFormat::from_bytes(b"not an image at all"),
            RasterFormat::Unknown
        );
        assert!(!RasterFormat::from_bytes(b"nope").is_embeddable());
    }
}
