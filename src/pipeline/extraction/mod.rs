//! Entry extractor: recognized page text → structured `MedicalEntry` records.

pub mod classify;
pub mod extractor;
pub mod patterns;

pub use classify::*;
pub use extractor::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Entry extraction failed on page {page}: {reason}")]
    PageFailed { page: usize, reason: String },
}
