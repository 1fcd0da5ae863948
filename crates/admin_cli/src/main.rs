use clap::{Args, Parser, Subcommand};

use api_types::impact::{ImpactUpdateNew, ImpactUpdateView, ImpactUpdatesResponse};
use api_types::ledger::TransactionListResponse;

#[derive(Parser, Debug)]
#[command(name = "aidchain_admin")]
#[command(about = "Admin utilities for AidChain (record disbursements, inspect the ledger)")]
struct Cli {
    /// Base URL of a running aidchain server (also read from `AIDCHAIN_SERVER`).
    #[arg(long, env = "AIDCHAIN_SERVER", default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Impact(Impact),
    Ledger(Ledger),
}

#[derive(Args, Debug)]
struct Impact {
    #[command(subcommand)]
    command: ImpactCommand,
}

#[derive(Subcommand, Debug)]
enum ImpactCommand {
    /// Record a disbursement and the impact it had.
    Record(ImpactRecordArgs),
    /// Show the most recent impact updates.
    Recent(ImpactRecentArgs),
}

#[derive(Args, Debug)]
struct ImpactRecordArgs {
    #[arg(long)]
    organization: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    funds_used: i64,
    #[arg(long)]
    people_impacted: i64,
}

#[derive(Args, Debug)]
struct ImpactRecentArgs {
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

#[derive(Args, Debug)]
struct Ledger {
    #[command(subcommand)]
    command: LedgerCommand,
}

#[derive(Subcommand, Debug)]
enum LedgerCommand {
    /// List ledger transactions, oldest first.
    List(LedgerListArgs),
}

#[derive(Args, Debug)]
struct LedgerListArgs {
    #[arg(long)]
    organization: Option<String>,
    /// One of: donation, disbursement, impact.
    #[arg(long)]
    kind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Command::Impact(Impact {
            command: ImpactCommand::Record(args),
        }) => {
            let body = ImpactUpdateNew {
                organization_id: args.organization,
                title: args.title,
                description: args.description,
                funds_used: args.funds_used,
                people_impacted: args.people_impacted,
            };
            let response = client
                .post(format!("{}/impact", cli.server))
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(format!("server rejected the update ({status}): {body}").into());
            }
            let update: ImpactUpdateView = response.json().await?;
            println!("recorded impact update {}", update.id);
        }
        Command::Impact(Impact {
            command: ImpactCommand::Recent(args),
        }) => {
            let response = client
                .get(format!("{}/impact/updates", cli.server))
                .send()
                .await?
                .error_for_status()?;
            let updates: ImpactUpdatesResponse = response.json().await?;

            for update in updates.updates.iter().rev().take(args.limit) {
                println!(
                    "{}  {}  ${} used, {} people helped",
                    update.recorded_at.format("%Y-%m-%d %H:%M"),
                    update.title,
                    update.funds_used,
                    update.people_impacted
                );
            }
        }
        Command::Ledger(Ledger {
            command: LedgerCommand::List(args),
        }) => {
            let mut request = client.get(format!("{}/transactions", cli.server));
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(organization) = args.organization {
                query.push(("organization_id", organization));
            }
            if let Some(kind) = args.kind {
                query.push(("kind", kind));
            }
            if !query.is_empty() {
                request = request.query(&query);
            }
            let response = request.send().await?.error_for_status()?;
            let transactions: TransactionListResponse = response.json().await?;

            for tx in transactions.transactions {
                println!(
                    "{}  {:<12}  {:>8}  {}  [{}]",
                    tx.timestamp.format("%Y-%m-%d %H:%M"),
                    tx.kind.as_str(),
                    tx.amount,
                    tx.description,
                    tx.id
                );
            }
        }
    }

    Ok(())
}
