use crate::core::allocation::run_allocation;
use crate::core::table::{parse_teams, write_teams};
use crate::domain::model::{AllocationResult, AllocationSummary, RawTeam, RunReport};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

/// Reads the team table from storage, allocates, and writes the results back.
pub struct AllocationPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> AllocationPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for AllocationPipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawTeam>> {
        tracing::debug!("Reading teams from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;
        parse_teams(
            &data,
            self.config.team_column(),
            self.config.preferences_column(),
        )
    }

    fn transform(&self, data: Vec<RawTeam>) -> Result<AllocationResult> {
        Ok(run_allocation(
            &data,
            self.config.seed(),
            self.config.manual_label(),
        ))
    }

    fn load(&self, result: AllocationResult) -> Result<RunReport> {
        let summary = AllocationSummary::from(&result);

        // Serialize everything before touching storage.
        let table = write_teams(&result)?;
        let summary_json = match self.config.summary_path() {
            Some(path) => Some((path, serde_json::to_string_pretty(&summary)?)),
            None => None,
        };

        tracing::debug!("Writing {} bytes to {}", table.len(), self.config.output_path());
        let mut files: Vec<(&str, &[u8])> = vec![(self.config.output_path(), table.as_slice())];
        if let Some((path, json)) = &summary_json {
            tracing::debug!("Writing summary to {}", path);
            files.push((*path, json.as_bytes()));
        }
        self.storage.write_files(&files)?;

        Ok(RunReport {
            output_path: self.config.output_path().to_string(),
            summary,
        })
    }
}
