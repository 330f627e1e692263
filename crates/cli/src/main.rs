//! Orderflow CLI - Command-line interface for the Orderflow intake daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7140";

#[derive(Parser)]
#[command(name = "orderflow")]
#[command(about = "Orderflow intake service CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Daemon RPC endpoint
    #[arg(long, env = "ORDERFLOW_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an order for intake
    Enqueue {
        /// Order id (positive integer)
        #[arg(short, long)]
        id: i64,

        /// Item description
        #[arg(short = 't', long)]
        item: String,
    },

    /// Check daemon health
    Health,

    /// Show queue and store statistics
    Stats,

    /// Requeue dead-lettered records for another delivery attempt
    Redrive,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u32,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct EnqueueResult {
    order_id: i64,
    message: String,
}

async fn call_rpc(
    client: &reqwest::Client,
    url: &str,
    method: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value> {
    let body = RpcRequest { jsonrpc: "2.0", method, params, id: 1 };

    let response: RpcResponse = client
        .post(url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("Failed to reach daemon at {}", url))?
        .json()
        .await
        .context("Daemon sent an unparseable response")?;

    if let Some(err) = response.error {
        anyhow::bail!("Call failed with code {}: {}", err.code, err.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("Response carried neither result nor error"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Enqueue { id, item } => {
            let params = json!({ "id": id, "item": item });

            let result = call_rpc(&client, &cli.rpc_url, "orders.enqueue.v1", params).await?;
            let accepted: EnqueueResult = serde_json::from_value(result)?;

            println!("{}", "✓ Order accepted".green().bold());
            println!();
            println!("{}", Table::new([accepted]));
        }

        Commands::Health => {
            match call_rpc(&client, &cli.rpc_url, "system.health.v1", json!({})).await {
                Ok(health) => {
                    let status = health["status"].as_str().unwrap_or("UNKNOWN");
                    println!("{} {}", "Daemon status:".bold(), status.green());
                }
                Err(e) => {
                    println!("{} {}", "Daemon status:".bold(), "UNREACHABLE".red());
                    println!("{} {}", "Cause:".bold(), e);
                }
            }
        }

        Commands::Stats => {
            println!("{}", "Orderflow Statistics".cyan().bold());
            println!();

            match call_rpc(&client, &cli.rpc_url, "admin.stats.v1", json!({})).await {
                Ok(stats) => {
                    println!("  {} {}", "Endpoint:".bold(), cli.rpc_url);
                    println!("  {} {}", "Daemon:".bold(), "ONLINE".green());
                    println!();
                    println!("  {} {}", "Queued:".bold(), stats["queued"]);
                    println!("  {} {}", "Dead letters:".bold(), stats["dead_letters"]);
                    println!(
                        "  {} {}",
                        "Persisted orders:".bold(),
                        stats["persisted_orders"]
                    );
                    println!(
                        "  {} {} seconds",
                        "Uptime:".bold(),
                        stats["uptime_seconds"]
                    );
                }
                Err(e) => {
                    println!("  {} {}", "Daemon:".bold(), "OFFLINE".red());
                    println!("  {} {}", "Cause:".bold(), e);
                }
            }
        }

        Commands::Redrive => {
            println!("{}", "Redriving dead letters...".cyan().bold());
            println!();

            match call_rpc(&client, &cli.rpc_url, "admin.redrive.v1", json!({})).await {
                Ok(outcome) => {
                    let redriven = outcome["redriven"].as_u64().unwrap_or(0);
                    if redriven > 0 {
                        println!("  {} {} records requeued", "✓".green(), redriven);
                    } else {
                        println!("  ○ No dead letters to requeue");
                    }
                }
                Err(e) => {
                    println!("  {} Redrive failed: {}", "✗".red(), e);
                }
            }
        }
    }

    Ok(())
}
