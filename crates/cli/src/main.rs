//! SwipeMatch CLI - Command-line client for the SwipeMatch daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9630";

#[derive(Parser)]
#[command(name = "swipematch")]
#[command(about = "SwipeMatch CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "SWIPEMATCH_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a seeker swipe (liked unless --reject)
    Swipe {
        seeker_id: i64,
        job_id: i64,

        /// Record a rejection instead of a like
        #[arg(long)]
        reject: bool,
    },

    /// Record recruiter interest in a seeker for a job
    Interest { seeker_id: i64, job_id: i64 },

    /// List matches of a seeker
    Matches {
        seeker_id: i64,

        /// Only show matches in this status (new, in_process, interview, offer)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// List swipes of a seeker
    Swipes { seeker_id: i64 },

    /// List recruiter interests for a job
    Interests { job_id: i64 },

    /// Move a match to another status
    Transition { match_id: i64, status: String },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct MatchRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    status: String,
    created_at: i64,
}

#[derive(Deserialize, Tabled)]
struct SwipeRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    liked: bool,
    created_at: i64,
}

#[derive(Deserialize, Tabled)]
struct InterestRow {
    id: i64,
    seeker_id: i64,
    job_id: i64,
    created_at: i64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

/// Decode `result[field]` into rows
fn rows<T: for<'de> Deserialize<'de>>(result: &serde_json::Value, field: &str) -> Result<Vec<T>> {
    let value = result
        .get(field)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Response is missing '{}'", field))?;
    serde_json::from_value(value).with_context(|| format!("Malformed '{}' in response", field))
}

fn print_table<T: Tabled>(items: Vec<T>, empty: &str) {
    if items.is_empty() {
        println!("{}", empty.yellow());
    } else {
        println!("{}", Table::new(items));
    }
}

fn print_matched(result: &serde_json::Value) -> Result<()> {
    match result.get("matched").filter(|m| !m.is_null()) {
        Some(m) => {
            let m: MatchRow = serde_json::from_value(m.clone())?;
            println!("{}", format!("★ Match #{} formed", m.id).green().bold());
            println!("{}", Table::new(vec![m]));
        }
        None => println!("  ○ No match yet"),
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Swipe {
            seeker_id,
            job_id,
            reject,
        } => {
            let params = json!({
                "seeker_id": seeker_id,
                "job_id": job_id,
                "liked": !reject,
            });
            let result = call_rpc(&cli.rpc_url, "swipe.record.v1", params).await?;

            let verb = if reject { "rejected" } else { "liked" };
            println!(
                "{}",
                format!("✓ Seeker {} {} job {}", seeker_id, verb, job_id)
                    .green()
                    .bold()
            );
            print_matched(&result)?;
        }

        Commands::Interest { seeker_id, job_id } => {
            let params = json!({ "seeker_id": seeker_id, "job_id": job_id });
            let result = call_rpc(&cli.rpc_url, "interest.record.v1", params).await?;

            if result["created"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Interest recorded".green().bold());
            } else {
                println!("{}", "○ Interest already recorded".yellow());
            }
            print_matched(&result)?;
        }

        Commands::Matches { seeker_id, status } => {
            let params = json!({ "seeker_id": seeker_id, "status": status });
            let result = call_rpc(&cli.rpc_url, "match.list.v1", params).await?;
            let matches: Vec<MatchRow> = rows(&result, "matches")?;

            println!("{}", format!("Matches for seeker {}:", seeker_id).cyan().bold());
            print_table(matches, "No matches");
        }

        Commands::Swipes { seeker_id } => {
            let params = json!({ "seeker_id": seeker_id });
            let result = call_rpc(&cli.rpc_url, "swipe.list.v1", params).await?;
            let swipes: Vec<SwipeRow> = rows(&result, "swipes")?;

            println!("{}", format!("Swipes by seeker {}:", seeker_id).cyan().bold());
            print_table(swipes, "No swipes");
        }

        Commands::Interests { job_id } => {
            let params = json!({ "job_id": job_id });
            let result = call_rpc(&cli.rpc_url, "interest.list.v1", params).await?;
            let interests: Vec<InterestRow> = rows(&result, "interests")?;

            println!("{}", format!("Recruiter interest for job {}:", job_id).cyan().bold());
            print_table(interests, "No recruiter interest");
        }

        Commands::Transition { match_id, status } => {
            let params = json!({ "match_id": match_id, "status": status });
            let result = call_rpc(&cli.rpc_url, "match.transition.v1", params).await?;
            let m: MatchRow = serde_json::from_value(result["match"].clone())
                .context("Malformed 'match' in response")?;

            println!(
                "{}",
                format!("✓ Match #{} is now {}", m.id, m.status).green().bold()
            );
            println!("{}", Table::new(vec![m]));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "✗".red().bold(), format!("{:#}", e).red());
        std::process::exit(1);
    }
}
