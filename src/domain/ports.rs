use crate::domain::model::{AllocationResult, RawTeam, RunReport};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;

    /// Writes every file or none of them.
    fn write_files(&self, files: &[(&str, &[u8])]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn summary_path(&self) -> Option<&str>;
    fn seed(&self) -> u32;
    fn team_column(&self) -> &str;
    fn preferences_column(&self) -> &str;
    fn manual_label(&self) -> &str;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<RawTeam>>;
    fn transform(&self, data: Vec<RawTeam>) -> Result<AllocationResult>;
    fn load(&self, result: AllocationResult) -> Result<RunReport>;
}
