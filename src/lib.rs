pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{allocation::run_allocation, etl::AllocationEngine, pipeline::AllocationPipeline};
pub use domain::model::{AllocationSummary, RunReport, MANUAL_ASSIGNMENT};
pub use utils::error::{AllocError, Result};
