//! asset-xref - actor drop-table extraction
//!
//! This crate walks an unpacked game asset pack, resolves each actor's
//! parameter file through its `$parent` chain and components, and assembles
//! the actor's drop tables into a single JSON artifact.

pub mod batch;
pub mod config;
pub mod drops;

pub use batch::{run_batch, write_output, BatchError, BatchOutcome, BatchReport, DropTableMap};
pub use config::{ConfigError, EffectiveConfig, ExtractSettings};
pub use drops::{DropTable, DropTableAssembler};
