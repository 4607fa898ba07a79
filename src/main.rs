// Shopper Traffic Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/shopper-traffic-simulator --output shoppers.csv
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/shopper-traffic-simulator --config store.json --seed 42 -v
// ```

use anyhow::Context;
use clap::Parser;
use shopper_traffic_simulator::events::RecordWriter;
use shopper_traffic_simulator::simulation::{
    DatasetAssembler, DatasetManifest, LoggingConfig, SimulationError,
};
use shopper_traffic_simulator::types::config::CliArgs;
use shopper_traffic_simulator::types::{weekday_name, StoreConfig, StoreSettings};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match StoreSettings::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    let _logging_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Shopper Traffic Simulator");

    let settings = match StoreSettings::from_cli_args(args.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let config = match settings.build() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no visits will be generated.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run(config) {
        let category = e
            .downcast_ref::<SimulationError>()
            .map(SimulationError::category)
            .unwrap_or("Unknown");
        error!(category, "Generation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Shopper Traffic Simulator completed successfully");
}

/// Generate the dataset, write it out and report statistics
fn run(config: StoreConfig) -> anyhow::Result<()> {
    let dataset = DatasetAssembler::new(config.clone()).generate();

    let written = {
        let _span = shopper_traffic_simulator::perf_span!(
            "export",
            records = dataset.len(),
            format = tracing::field::display(config.output_format()),
        )
        .entered();

        let mut writer = RecordWriter::create(config.output_path(), config.output_format())
            .with_context(|| {
                format!(
                    "Failed to open output '{}'",
                    config.output_path().unwrap_or("<stdout>")
                )
            })?;
        let written = writer
            .write_all(dataset.records())
            .context("Failed to write visit records")?;
        writer.finish().context("Failed to flush visit records")?;
        written
    };

    info!("Wrote {} visit records", written);

    if let Some(output) = config.output_path() {
        let manifest_path = DatasetManifest::path_for(output);
        dataset
            .manifest()
            .write_to(&manifest_path)
            .with_context(|| format!("Failed to write manifest '{}'", manifest_path.display()))?;
        eprintln!("Visits written to: {}", output);
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!("Random Seed: {}", dataset.seed());
    eprintln!("{}", dataset.statistics().summary());
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &StoreConfig) {
    eprintln!("Shopper Traffic Simulator");
    eprintln!("=========================");
    eprintln!("Synthetic per-visitor retail store logs");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &StoreConfig) {
    let hours = config.operating_hours();
    let lunch = config.lunch();
    let dinner = config.dinner();
    let senior = config.senior();
    let dwell = config.dwell();

    eprintln!("Configuration:");
    eprintln!(
        "  Date Range: {} to {} ({} days)",
        config.start_date(),
        config.end_date(),
        config.day_count()
    );
    eprintln!(
        "  Operating Hours: {} - {}",
        hours.start().format("%H:%M"),
        hours.end().format("%H:%M")
    );
    eprintln!(
        "  Weekly Baseline Traffic: {}",
        config.weekday_traffic().weekly_total()
    );
    eprintln!(
        "  Lunch Rush: {} - {} ({:.0}%)",
        lunch.window().start().format("%H:%M"),
        lunch.window().end().format("%H:%M"),
        lunch.percent() * 100.0
    );
    eprintln!(
        "  Dinner Rush: {} - {} ({:.0}%)",
        dinner.window().start().format("%H:%M"),
        dinner.window().end().format("%H:%M"),
        dinner.percent() * 100.0
    );
    eprintln!(
        "  Senior Discount: {} {} - {} ({:.0}%)",
        weekday_name(senior.day()),
        senior.rush().window().start().format("%H:%M"),
        senior.rush().window().end().format("%H:%M"),
        senior.percent() * 100.0
    );
    eprintln!(
        "  Dwell Time: {} / {} / {} minutes",
        dwell.min(),
        dwell.avg(),
        dwell.max()
    );
    eprintln!(
        "  Sunny Weekend Chance: {:.0}%",
        config.sunny().chance() * 100.0
    );
    eprintln!("  Holiday Calendar: {:?}", config.holiday_calendar());
    eprintln!("  Output Format: {}", config.output_format());
    if let Some(seed) = config.seed() {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
