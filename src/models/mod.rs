pub mod document;
pub mod entry;
pub mod enums;
pub mod opportunity;

pub use document::*;
pub use entry::*;
pub use enums::*;
pub use opportunity::*;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ProcessingStatus,
        to: ProcessingStatus,
    },

    #[error("Document is no longer accepting updates (status: {0})")]
    DocumentSealed(ProcessingStatus),

    #[error("Opportunity references entry {entry_id} outside document {document_id}")]
    ForeignEntry { entry_id: Uuid, document_id: Uuid },
}
