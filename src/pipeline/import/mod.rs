pub mod format;

use serde::{Deserialize, Serialize};

use crate::models::FileKind;

/// A binary document handed over by the upload boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub filename: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub volume_label: Option<String>,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, volume_label: Option<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            volume_label,
        }
    }

    pub fn file_kind(&self) -> FileKind {
        FileKind::from_filename(&self.filename)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_reports_kind_and_size() {
        let upload = DocumentUpload::new("str_vol2.png", vec![0u8; 42], Some("Vol 2".into()));
        assert_eq!(upload.file_kind(), FileKind::Png);
        assert_eq!(upload.size(), 42);
    }
}
