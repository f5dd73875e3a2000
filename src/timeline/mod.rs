//! Service timeline: a chronological projection of extracted entries.
//!
//! Nothing here is stored. The timeline is rebuilt from the entries on
//! every request.

mod builder;
mod types;

pub use builder::*;
pub use types::*;
