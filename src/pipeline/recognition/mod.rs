//! Text recognition adapter: binary document → ordered page texts.
//!
//! The OCR engine itself sits behind the `TextRecognizer` trait. The
//! `RecognitionAdapter` wraps any engine and never lets its failures reach
//! the coordinator: a failing engine yields a single placeholder page.

pub mod adapter;
pub mod engines;
pub mod sanitize;
pub mod types;

pub use adapter::*;
pub use engines::*;
pub use sanitize::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("Text recognition engine unavailable: {0}")]
    Unavailable(String),

    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(String),
}
