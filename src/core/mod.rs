pub mod allocation;
pub mod allocator;
pub mod etl;
pub mod pipeline;
pub mod preferences;
pub mod preprocess;
pub mod table;
pub mod themes;

pub use crate::domain::model::{AllocationResult, AllocationStats, RawTeam, Round, Team};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
