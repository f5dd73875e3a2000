pub mod import;
pub mod recognition;
pub mod extraction;
pub mod analysis;
pub mod opportunity;
pub mod summary;
pub mod processor; // Processing coordinator: document state machine + stage driver
pub mod diagnostic; // Per-stage JSON dumps (enabled by STR_INTEL_DUMP_DIR)
