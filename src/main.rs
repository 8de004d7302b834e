use clap::Parser;
use streak_stats::utils::error::ErrorSeverity;
use streak_stats::utils::{logger, validation::Validate};
use streak_stats::{CliConfig, LocalStorage, StreakEngine, StreakError, StreakPipeline};

fn report(e: &StreakError) -> i32 {
    tracing::error!(
        "❌ Streak generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => std::process::exit(report(&e)),
    };
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StreakPipeline::new(storage, config);
    let engine = StreakEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ SVG generated successfully");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            let exit_code = report(&e);
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
