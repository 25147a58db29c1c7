use crate::domain::model::RunReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct AllocationEngine<P: Pipeline> {
    pipeline: P,
    monitoring: bool,
}

impl<P: Pipeline> AllocationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitoring: bool) -> Self {
        Self {
            pipeline,
            monitoring,
        }
    }

    /// Extract, allocate and load. Nothing is written unless the first two
    /// steps succeed.
    pub fn run(&self) -> Result<RunReport> {
        let mut monitor = SystemMonitor::new(self.monitoring);
        tracing::info!("Starting allocation run");

        let raw_teams = self.pipeline.extract()?;
        tracing::info!("Read {} teams", raw_teams.len());
        monitor.log_stats("Extract");

        let result = self.pipeline.transform(raw_teams)?;
        tracing::info!(
            "Allocated {} of {} teams ({} / {} / {} per round)",
            result.stats.total(),
            result.teams.len(),
            result.stats.round1,
            result.stats.round2,
            result.stats.round3
        );
        monitor.log_stats("Allocate");

        let report = self.pipeline.load(result)?;
        tracing::info!("Output saved to: {}", report.output_path);
        monitor.log_stats("Load");
        monitor.log_final_stats();

        Ok(report)
    }
}
