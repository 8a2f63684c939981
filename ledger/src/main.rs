// moneyflow command-line entry point
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ledger::config::settings::ImportSettings;
use ledger::data::ledger_store::LedgerStore;
use ledger::error::LedgerError;
use ledger::services::ImportService;
use shared::numeric::{
    normalise_numeric_string, parse_currency_to_number, sanitize_numeric_input, Separator, SeparatorAnalysis,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "moneyflow", version, about = "Bookkeeping imports with locale-aware amount parsing")]
struct Cli {
    /// JSON file with import settings (delimiter, columns, date formats, tax rate)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical decimal-point form of each value
    Normalize {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
        /// Also show how the separators were classified
        #[arg(long)]
        explain: bool,
    },
    /// Print the amount each value parses to
    Parse {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Import a bank statement CSV and print the account summary as JSON
    ImportCsv {
        file: PathBuf,
        #[arg(long)]
        account: Option<String>,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Import a JSON backup and print the dashboard summary as JSON
    ImportBackup {
        file: PathBuf,
        /// Day the monthly changes are measured from (YYYY-MM-DD, default today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

fn explain(value: &str) -> String {
    let sanitized = sanitize_numeric_input(value);
    let analysis = SeparatorAnalysis::of(&sanitized);
    let describe = |sep: Option<Separator>| {
        sep.map_or_else(|| "none".to_string(), |s| format!("'{}'", s.as_char()))
    };
    format!(
        "{}\t{}\tgrouping={} decimal={} thousands={}",
        value,
        normalise_numeric_string(value),
        analysis.thousand_separated,
        describe(analysis.decimal),
        describe(analysis.thousand),
    )
}

async fn run(cli: Cli) -> Result<(), LedgerError> {
    let settings = match &cli.config {
        Some(path) => ImportSettings::load_from_file(path)?,
        None => ImportSettings::default(),
    };

    match cli.command {
        Command::Normalize { values, explain: verbose } => {
            for value in &values {
                if verbose {
                    println!("{}", explain(value));
                } else {
                    println!("{}", normalise_numeric_string(value));
                }
            }
        }
        Command::Parse { values } => {
            for value in &values {
                println!("{}", parse_currency_to_number(value));
            }
        }
        Command::ImportCsv { file, account, from, to } => {
            let service = ImportService::new(Arc::new(RwLock::new(LedgerStore::new())), settings);
            let account = account.unwrap_or_else(|| service.settings().default_account.clone());
            let response = service.load_csv_statement(file, Some(account.clone())).await?;
            info!(count = response.entries_loaded, "{}", response.message);
            let summary = service.account_summary(&account, from, to).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::ImportBackup { file, as_of } => {
            let service = ImportService::new(Arc::new(RwLock::new(LedgerStore::new())), settings);
            let reference_date = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
            let summary = service.load_backup(file, reference_date).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting MoneyFlow ledger tools...");

    if let Err(err) = run(cli).await {
        tracing::error!(error = %err, "Command failed");
        let code = err.exit_code();
        eprintln!("{}", anyhow::Error::from(err).context("moneyflow failed"));
        std::process::exit(code);
    }
    Ok(())
}
