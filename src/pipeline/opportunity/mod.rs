//! Opportunity generator: analyzed condition groups → ranked claim opportunities.

pub mod generator;
pub mod profile;
pub mod templates;

pub use generator::*;
pub use profile::*;
pub use templates::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpportunityError {
    #[error("Condition group '{0}' has no entries")]
    EmptyGroup(String),
}
