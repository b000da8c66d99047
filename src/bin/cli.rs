//! Sleep Dashboard CLI
//!
//! Command-line interface for the sleep dashboard:
//! - Summarise the sleep CSV locally
//! - Inspect rows that were rejected or flagged while loading
//! - Fetch the data from a running API server
//! - Extract sleep data from Garmin Connect into the CSV
//! - Generate a default config file

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sleep_dashboard::api::SleepDataResponse;
use sleep_dashboard::config::Config;
use sleep_dashboard::garmin::{
    extract_sleep, write_csv_file, Credentials, DateRange, ExtractFormat, GarminClient,
};
use sleep_dashboard::sleep::{LoadReport, SleepCsvLoader, SleepRecord};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sleep-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarise Garmin sleep exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the sleep CSV and print records with the average
    Summary {
        /// Sleep CSV (default: configured data.csv_path)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show rows that were rejected or flagged while loading
    Inspect {
        /// Sleep CSV (default: configured data.csv_path)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Fetch sleep data from a running API server
    Fetch {
        /// API server URL
        #[arg(long, default_value = "http://localhost:8082")]
        api_url: String,
    },

    /// Extract sleep data from Garmin Connect into the sleep CSV
    ///
    /// Credentials come from GARMIN_EMAIL and GARMIN_PASSWORD.
    Extract {
        /// First date to fetch, YYYY-MM-DD (default: 7 days before --end)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date to fetch, YYYY-MM-DD (default: today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output CSV (default: configured data.csv_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write sleep stages, stress, respiration and derived percentages
        #[arg(long)]
        detailed: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sleep_dashboard=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => {
            let loaded = Config::load_default();
            loaded.log();
            loaded.config
        }
    };

    let loader = SleepCsvLoader::new()
        .with_date_column(&config.data.date_column)
        .with_sleep_column(&config.data.sleep_column);

    match cli.command {
        Commands::Summary { file } => {
            let path = file.unwrap_or_else(|| config.data.csv_path());
            let report = load_or_exit(&loader, &path).await;
            let response = SleepDataResponse::from(report);

            match cli.format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                "csv" => {
                    print_csv(&response.sleep_data)?;
                }
                _ => {
                    print_table(&response.sleep_data);
                    println!();
                    println!("Average Sleep Time: {} hours", format_average(response.avg_sleep_time));
                }
            }
        }

        Commands::Inspect { file } => {
            let path = file.unwrap_or_else(|| config.data.csv_path());
            let report = load_or_exit(&loader, &path).await;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&path, &report);
            }
        }

        Commands::Fetch { api_url } => {
            let url = format!("{}/api/sleep-data", api_url.trim_end_matches('/'));

            let response = match reqwest::get(&url).await {
                Ok(resp) => resp,
                Err(e) => {
                    eprintln!("Cannot connect to sleep dashboard API at {}", api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin sleep-dashboard-api");
                    std::process::exit(1);
                }
            };

            if !response.status().is_success() {
                eprintln!("API returned error: {}", response.status());
                std::process::exit(1);
            }

            let data: SleepDataResponse = response
                .json()
                .await
                .context("API returned an unexpected body")?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                "csv" => print_csv(&data.sleep_data)?,
                _ => {
                    print_table(&data.sleep_data);
                    println!();
                    println!("Average Sleep Time: {} hours", format_average(data.avg_sleep_time));
                }
            }
        }

        Commands::Extract {
            start,
            end,
            output,
            detailed,
        } => {
            let credentials = Credentials::from_env()?;
            let range = DateRange::resolve(start, end, chrono::Local::now().date_naive());
            let path = output.unwrap_or_else(|| config.data.csv_path());
            let format = if detailed {
                ExtractFormat::Detailed
            } else {
                ExtractFormat::Standard
            };

            println!("Fetching sleep data from {} to {}", range.start, range.end);

            let client = match GarminClient::login(&credentials).await {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Cannot sign in to Garmin Connect: {}", e);
                    std::process::exit(1);
                }
            };

            let report = extract_sleep(&client, range).await?;

            for (date, error) in &report.failed_days {
                eprintln!("Error getting data for {}: {}", date, error);
            }
            for date in &report.empty_days {
                println!("No valid sleep data for {}", date);
            }

            if report.nights.is_empty() {
                eprintln!("Warning: no sleep data was fetched");
            }

            let written = write_csv_file(&path, &report.nights, format)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Sleep data saved to {:?} ({} nights)", path, written);
        }

        Commands::Config { output } => {
            let config = sleep_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn load_or_exit(loader: &SleepCsvLoader, path: &Path) -> LoadReport {
    match loader.load(path).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn format_average(average: Option<f64>) -> String {
    average
        .map(|avg| format!("{:.2}", avg))
        .unwrap_or_else(|| "N/A".to_string())
}

fn print_table(records: &[SleepRecord]) {
    if records.is_empty() {
        println!("No sleep data available.");
        return;
    }

    println!("{:<12} | {:<10} | {:<10}", "Date", "Sleep (h)", "Awake (h)");
    println!("{}", "-".repeat(38));

    for record in records {
        println!(
            "{:<12} | {:<10.2} | {:<10.2}",
            record.date, record.sleep_time, record.awake_time
        );
    }
}

fn print_csv(records: &[SleepRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_report(path: &Path, report: &LoadReport) {
    println!("File: {:?}", path);
    println!("  Rows read: {}", report.rows_read);
    println!("  Records: {}", report.records.len());
    println!("  Rejected: {}", report.rejected.len());
    println!("  Flagged: {}", report.flagged.len());
    println!("  Average sleep: {} hours", format_average(report.average()));

    if !report.rejected.is_empty() {
        println!();
        println!("Rejected rows:");
        for issue in &report.rejected {
            println!("  line {} ({}): {}", issue.line, issue.date, issue.reason);
        }
    }

    if !report.flagged.is_empty() {
        println!();
        println!("Flagged rows:");
        for issue in &report.flagged {
            println!("  line {} ({}): {}", issue.line, issue.date, issue.reason);
        }
    }

    if report.is_clean() {
        println!();
        println!("All rows loaded cleanly.");
    }
}
