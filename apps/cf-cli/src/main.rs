use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use cf_app::{AllowList, AppResult, BatchReport, Engine, EngineConfig, run_batch};
use cf_core::round2;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "carbonflow CLI - GHG emission calculation and reconciliation", long_about = None)]
struct Cli {
    /// Log debug output (cache hits, per-record results)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a record batch file without calculating it
    Validate {
        /// Path to the records YAML or JSON file
        records_path: PathBuf,
    },
    /// Calculate emissions for a record batch
    Calculate {
        /// Path to the records YAML or JSON file
        records_path: PathBuf,
        /// Factor tables (YAML or JSON)
        #[arg(short, long)]
        factors: PathBuf,
        /// Engine configuration (GWP values, table names, scope)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Write the default engine configuration as YAML
    InitConfig {
        /// Output path for the configuration file
        output_path: PathBuf,
    },
    /// List the values a factor table accepts for a field
    Allowed {
        /// Factor tables (YAML or JSON)
        factors: PathBuf,
        /// fuel-types, vehicle-types, freight-types, waste-types,
        /// waste-treatment-methods, refrigerants, countries or states
        list: AllowList,
        /// Fuel state, vehicle table, waste type or country, depending on the list
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Validate { records_path } => cmd_validate(&records_path),
        Commands::Calculate {
            records_path,
            factors,
            config,
            json,
        } => cmd_calculate(&records_path, &factors, config.as_deref(), json.as_deref()),
        Commands::InitConfig { output_path } => cmd_init_config(&output_path),
        Commands::Allowed {
            factors,
            list,
            filter,
        } => cmd_allowed(&factors, list, filter.as_deref()),
    }
}

fn cmd_validate(records_path: &Path) -> AppResult<()> {
    println!("Validating records: {}", records_path.display());
    let batch = cf_records::load(records_path)?;
    println!("✓ {} records are valid", batch.len());
    Ok(())
}

fn cmd_calculate(
    records_path: &Path,
    factors: &Path,
    config: Option<&Path>,
    json: Option<&Path>,
) -> AppResult<()> {
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::from_factor_file(factors, config)?;

    let mut batch = cf_records::load(records_path)?;
    if batch.name.is_none() {
        batch.name = records_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
    }

    let report = run_batch(&engine, &batch)?;
    print_report(&report);

    if let Some(path) = json {
        report.save_json(path)?;
        println!("✓ Report written to {}", path.display());
    }
    Ok(())
}

fn cmd_init_config(output_path: &Path) -> AppResult<()> {
    EngineConfig::default().save_yaml(output_path)?;
    println!("✓ Configuration written to {}", output_path.display());
    Ok(())
}

fn cmd_allowed(factors: &Path, list: AllowList, filter: Option<&str>) -> AppResult<()> {
    let engine = Engine::from_factor_file(factors, EngineConfig::default())?;
    match engine.allowed(list, filter)? {
        None => println!("No {} listed: any value is accepted", list),
        Some(values) if values.is_empty() => println!("No {} found", list),
        Some(values) => {
            for value in values {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    println!(
        "Batch: {}",
        report.name.as_deref().unwrap_or("<unnamed>")
    );
    println!(
        "  {:<6} {:<26} {:<26} {:>14} {:>8}",
        "index", "category", "best method", "kg CO2e", "quality"
    );
    for record in &report.records {
        let method = record
            .best_method
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let amount = record
            .amount_kg
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<6} {:<26} {:<26} {:>14} {:>8.2}",
            record.index,
            record.category.to_string(),
            method,
            amount,
            record.data_quality
        );
    }

    println!();
    for (scope, amount) in &report.emissions_by_scope {
        println!("  {:<10} {:>14.2} kg CO2e", scope.to_string(), amount);
    }
    println!(
        "  Total emissions: {:.2} kg CO2e ({:.3} t)",
        report.total_emissions_kg, report.total_emissions_tonnes
    );
    if report.total_removals_kg > 0.0 {
        println!("  Removals: {:.2} kg CO2e", report.total_removals_kg);
        println!("  Net: {:.2} kg CO2e", round2(report.net_emissions_kg));
    }
    println!(
        "  Factor lookups: {} hits, {} misses",
        report.cache.hits, report.cache.misses
    );

    for record in report.uncalculated() {
        println!(
            "  ? no method for {} ({})",
            record.record_id, record.category
        );
    }
    for rejection in &report.rejections {
        println!("  ✗ rejected {}: {}", rejection.record_id, rejection.reason);
    }
    for failure in &report.failures {
        println!("  ✗ failed {} ({}): {}", failure.record_id, failure.category, failure.message);
    }
}
