use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use finwise_classify::{Classifier, HttpCompletion, RemoteClassifier, handle_json};
use finwise_core::{CategoryTable, Transaction, category_stats};
use finwise_ingest::{detect_columns, map_rows, read_statement};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod config;
mod logging;
mod output;
mod state;

use config::{Config, InitOutcome, Mode};

#[derive(Parser, Debug)]
#[command(
    name = "finwise",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINWISE_BUILD_SHA"), ")"),
    about = "Categorize bank-statement CSVs by keyword rules or a hosted model"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a statement's headers and the auto-detected column mapping
    Columns {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Map and categorize every statement row
    Categorize {
        #[command(flatten)]
        input: StatementArgs,

        /// Print `{ "transactions": [...] }` instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Spend by category for a statement
    Summary {
        #[command(flatten)]
        input: StatementArgs,

        #[arg(long)]
        json: bool,
    },

    /// Categorize a `{ "transactions": [...] }` JSON payload
    ClassifyJson {
        /// Payload file, or `-` for stdin
        #[arg(long, default_value = "-")]
        input: String,

        #[arg(long, value_enum)]
        mode: Option<Mode>,
    },

    /// Manage ~/.finwise/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct StatementArgs {
    /// Statement CSV with a header row
    #[arg(long)]
    csv: PathBuf,

    /// Override the detected date column
    #[arg(long)]
    date_column: Option<String>,

    /// Override the detected description column
    #[arg(long)]
    description_column: Option<String>,

    /// Override the detected amount column
    #[arg(long)]
    amount_column: Option<String>,

    /// Classifier to use (default from config)
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Columns { csv } => {
            let stmt = read_statement(&csv)?;
            let guess = detect_columns(&stmt.headers, stmt.preview());
            output::print_columns(&stmt.headers, &guess);
        }

        Command::Categorize { input, json } => {
            let cfg = config::load_config()?;
            let txns = categorize_statement(&cfg, &input).await?;
            if json {
                let body = finwise_classify::CategorizeBody { transactions: txns };
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                output::print_transactions(&txns);
            }
        }

        Command::Summary { input, json } => {
            let cfg = config::load_config()?;
            let txns = categorize_statement(&cfg, &input).await?;
            let stats = category_stats(&txns);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                output::print_stats(&stats);
            }
        }

        Command::ClassifyJson { input, mode } => {
            let cfg = config::load_config()?;
            let body = read_input(&input)?;
            let classifier = build_classifier(&cfg, mode)?;
            let (status, out) = handle_json(&classifier, &body).await;
            println!("{}", serde_json::to_string_pretty(&out)?);
            if status != 200 {
                bail!("payload rejected (status {status})");
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => match config::init_config()? {
                InitOutcome::Created(path) => println!("wrote default config to {}", path.display()),
                InitOutcome::AlreadyPresent(path) => {
                    println!("{} already exists, left unchanged", path.display())
                }
            },
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn build_classifier(cfg: &Config, mode: Option<Mode>) -> Result<Classifier<HttpCompletion>> {
    let table = Arc::new(CategoryTable::canonical());
    match mode.unwrap_or(cfg.classifier.mode) {
        Mode::Keyword => Ok(Classifier::Keyword(table)),
        Mode::Remote => {
            let remote = &cfg.remote;
            let client = HttpCompletion::new(&remote.base_url, remote.api_key(), remote.timeout())
                .context("building model host client")?;
            info!(endpoint = client.endpoint(), model = %remote.model, "using remote classifier");
            Ok(Classifier::Remote(RemoteClassifier::new(
                client,
                table,
                remote.settings(),
            )))
        }
    }
}

/// Read, map and categorize a statement file
async fn categorize_statement(cfg: &Config, args: &StatementArgs) -> Result<Vec<Transaction>> {
    let stmt = read_statement(&args.csv)?;

    let mapping = detect_columns(&stmt.headers, stmt.preview())
        .with_overrides(
            args.date_column.clone(),
            args.description_column.clone(),
            args.amount_column.clone(),
        )
        .confirm()
        .map_err(|e| {
            anyhow!(
                "{e}; pass --date-column/--description-column/--amount-column (headers: {})",
                stmt.headers.join(", ")
            )
        })?;
    mapping.validate_against(&stmt.headers)?;

    let txns = map_rows(&stmt.rows, &mapping);
    info!(
        rows = stmt.rows.len(),
        transactions = txns.len(),
        "mapped {}",
        args.csv.display()
    );

    let classifier = build_classifier(cfg, args.mode)?;
    Ok(classifier.classify(txns).await)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("reading stdin")?;
        return Ok(s);
    }
    std::fs::read_to_string(input).with_context(|| format!("read {input}"))
}
