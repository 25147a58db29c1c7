use clap::Parser;
use team_alloc::utils::{logger, validation::Validate};
use team_alloc::{AllocationEngine, AllocationPipeline, CliConfig, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    logger::init(config.verbose, config.json_logs);

    tracing::info!("Starting team-alloc");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("System monitoring enabled");
    }

    let pipeline = AllocationPipeline::new(LocalStorage::default(), config);
    let engine = AllocationEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(report) => {
            let rounds = report.summary.rounds;
            println!("Allocation complete: {} teams", report.summary.teams);
            println!(
                "  round 1: {}, round 2: {}, round 3: {}",
                rounds.round1, rounds.round2, rounds.round3
            );
            println!("  needs manual assignment: {}", report.summary.manual_assignment);
            println!("Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "Allocation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
