//! DataDash CLI - serve and inspect internship listings
//!
//! ```bash
//! datadash serve                         # Start HTTP server (PORT or 8000)
//! datadash inspect data.csv              # Show what the loader sees
//! datadash insights data.csv             # Print key insights as JSON
//! datadash filter data.csv --domain X    # Print matching listings as JSON
//! ```

use clap::{Parser, Subcommand};
use datadash::{filter_listings, key_insights, load, load_report, top_domains, Config, FilterParams};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "datadash")]
#[command(about = "Analytics API over internship and job listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Listings CSV (overrides DATA_PATH)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Load a CSV and report encoding, delimiter, columns and row count
    Inspect {
        /// Input CSV file
        input: PathBuf,

        /// Number of top job titles to show
        #[arg(long, default_value = "5")]
        top: usize,
    },

    /// Print dataset-wide key insights as JSON
    Insights {
        /// Input CSV file
        input: PathBuf,
    },

    /// Print listings matching the filters as JSON
    Filter {
        /// Input CSV file
        input: PathBuf,

        /// Job title, or "All"
        #[arg(long)]
        domain: Option<String>,

        /// Location, or "All"
        #[arg(long)]
        location: Option<String>,

        /// Minimum average salary
        #[arg(long)]
        min_salary: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, data } => cmd_serve(port, data).await,
        Commands::Inspect { input, top } => cmd_inspect(&input, top),
        Commands::Insights { input } => cmd_insights(&input),
        Commands::Filter {
            input,
            domain,
            location,
            min_salary,
        } => cmd_filter(
            &input,
            FilterParams {
                domain,
                location,
                min_salary,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>, data: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?.with_port(port).with_data_path(data);
    datadash::server::start_server(config).await?;
    Ok(())
}

fn cmd_inspect(input: &Path, top: usize) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", input.display());

    let report = load_report(input)?;

    eprintln!("   Encoding: {}", report.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(report.delimiter));
    eprintln!("   Columns: {}", report.columns.join(", "));
    eprintln!("✅ Loaded {} listings", report.table.len());

    if !report.table.is_empty() {
        eprintln!("\n📊 Top job titles:");
        for row in top_domains(&report.table, top) {
            println!("   {:>5}  {}", row.count, row.domain);
        }
    }

    Ok(())
}

fn cmd_insights(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = load(input);
    let insights = key_insights(&table);
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}

fn cmd_filter(input: &Path, params: FilterParams) -> Result<(), Box<dyn std::error::Error>> {
    let table = load(input);
    let rows = filter_listings(&table, &params)?;
    eprintln!("🔎 {} of {} listings match", rows.len(), table.len());
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
