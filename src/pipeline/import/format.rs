use std::path::Path;

use crate::models::FileKind;

impl FileKind {
    /// Classify by filename extension (case-insensitive).
    /// Unknown or missing extensions are treated as PDF.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "tif" | "tiff" => Self::Tiff,
            "jpg" | "jpeg" => Self::Jpg,
            "png" => Self::Png,
            "heic" | "heif" => Self::Heic,
            _ => Self::Pdf,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Tiff => "image/tiff",
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
            Self::Heic => "image/heic",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }
}
