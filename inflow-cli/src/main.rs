use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use inflow_core::{TypeFilter, compute_stats, filter_transactions};
use inflow_providers::{ProviderSet, Source};
use inflow_server::{init_config, load_config};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "inflow", version, about = "Personal income dashboard backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Config file (default: ~/.inflow/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured listening port
        #[arg(long)]
        port: Option<u16>,
    },

    /// One-shot fetch: print stats and a transaction table for a source
    Fetch {
        /// Data source: provider_a or provider_b
        source: String,

        /// Lookback window in days (default: from config)
        #[arg(long)]
        days: Option<u32>,

        /// Case-insensitive description search
        #[arg(long, default_value = "")]
        search: String,

        /// Type filter: all, income, refund, fee, withdrawal
        #[arg(long = "type", default_value = "all")]
        type_filter: String,

        /// Print the raw JSON payload instead of a table
        #[arg(long)]
        json: bool,

        /// Config file (default: ~/.inflow/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Config management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, port } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(p) = port {
                cfg.server.port = p;
            }
            inflow_server::serve(cfg).await?;
        }

        Command::Fetch {
            source,
            days,
            search,
            type_filter,
            json,
            config,
        } => {
            fetch(source, days, search, type_filter, json, config).await?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                init_config()?;
            }
        },
    }

    Ok(())
}

async fn fetch(
    source: String,
    days: Option<u32>,
    search: String,
    type_filter: String,
    json: bool,
    config: Option<PathBuf>,
) -> Result<()> {
    let Some(source) = Source::parse(&source) else {
        bail!("unknown source: {source} (expected provider_a or provider_b)");
    };
    let Some(type_filter) = TypeFilter::parse(&type_filter) else {
        bail!("unknown type filter (expected all, income, refund, fee or withdrawal)");
    };

    let cfg = load_config(config.as_deref())?;
    let providers = ProviderSet::new(cfg.provider_settings());
    let cancel = CancellationToken::new();
    let days = days.filter(|d| *d > 0).unwrap_or(cfg.server.default_days);
    let result = providers.fetch_recent(source, days, &cancel).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    // Stats always cover the full window; the filter only narrows the table.
    let stats = compute_stats(&result.transactions);
    let visible = filter_transactions(&result.transactions, &search, type_filter);

    println!("Source: {} | window: {} days", result.source, result.days);
    println!(
        "Total income: ${:.2} | highest: ${:.2} | count: {}\n",
        stats.total_income, stats.highest_transaction, stats.transaction_count
    );

    if visible.is_empty() {
        println!("No transactions found matching your filters.");
        return Ok(());
    }

    println!("{:<12} {:<12} {:<40} {:>12}", "Date", "Type", "Description", "Amount");
    for tx in &visible {
        let desc = if tx.description.chars().count() > 38 {
            let mut d: String = tx.description.chars().take(37).collect();
            d.push('…');
            d
        } else {
            tx.description.clone()
        };
        println!(
            "{:<12} {:<12} {:<40} {:>12}",
            tx.date,
            tx.tx_type.as_str(),
            desc,
            format!("{:+.2}", tx.amount)
        );
    }

    Ok(())
}
