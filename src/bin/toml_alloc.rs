use clap::Parser;
use std::collections::BTreeSet;
use team_alloc::core::preprocess::preprocess;
use team_alloc::domain::ports::{ConfigProvider, Pipeline};
use team_alloc::utils::{logger, validation::Validate};
use team_alloc::{AllocError, AllocationEngine, AllocationPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-alloc")]
#[command(about = "Team theme allocation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "alloc-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the base seed from config
    #[arg(long)]
    seed: Option<u32>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Read and check the input without allocating or writing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    let debug_level = config
        .monitoring
        .as_ref()
        .and_then(|m| m.log_level.as_deref())
        .is_some_and(|level| level.eq_ignore_ascii_case("debug"));
    logger::init(args.verbose || debug_level, args.json_logs);

    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(seed) = args.seed {
        config.allocation.seed = Some(seed);
        tracing::info!("Seed overridden to: {}", seed);
    }

    if let Err(e) = config.validate() {
        fail(&e, "Configuration validation failed");
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = AllocationPipeline::new(LocalStorage::default(), config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - nothing will be written");
        if let Err(e) = perform_dry_run(&pipeline) {
            fail(&e, "Dry run failed");
        }
        return;
    }

    let engine = AllocationEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run() {
        Ok(report) => {
            let rounds = report.summary.rounds;
            println!(
                "Allocated {} of {} teams (round 1: {}, round 2: {}, round 3: {})",
                report.summary.allocated,
                report.summary.teams,
                rounds.round1,
                rounds.round2,
                rounds.round3
            );
            println!("Output saved to: {}", report.output_path);
        }
        Err(e) => fail(&e, "Allocation failed"),
    }
}

fn fail(e: &AllocError, context: &str) -> ! {
    tracing::error!(
        "{}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("Configuration Summary:");
    println!("  Allocation: {}", config.allocation.name);
    println!("  Seed: {}", config.seed());
    println!(
        "  Input: {} (columns '{}', '{}')",
        config.input_path(),
        config.team_column(),
        config.preferences_column()
    );
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.formats().join(", "));
    if let Some(summary) = config.summary_path() {
        println!("  Summary: {}", summary);
    }
    if args.dry_run {
        println!("  DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(
    pipeline: &AllocationPipeline<LocalStorage, TomlConfig>,
) -> team_alloc::Result<()> {
    let rows = pipeline.extract()?;
    let teams = preprocess(&rows, pipeline.config().manual_label());

    let groups: BTreeSet<&str> = teams.iter().map(|t| t.group_id.as_str()).collect();
    let domains: BTreeSet<&str> = teams
        .iter()
        .flat_map(|t| t.choices.iter().flatten())
        .map(String::as_str)
        .collect();
    let without_choices = teams
        .iter()
        .filter(|t| t.choices.iter().all(Option::is_none))
        .count();

    println!("Dry Run Analysis:");
    println!("  Teams: {}", teams.len());
    println!("  Groups: {}", groups.len());
    println!(
        "  Domains requested: {}",
        domains.into_iter().collect::<Vec<_>>().join(", ")
    );
    println!("  Teams without any preference: {}", without_choices);
    println!();
    println!("Dry run complete. Nothing was written.");

    Ok(())
}
