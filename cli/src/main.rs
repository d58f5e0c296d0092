//! ethrpc CLI — query an Ethereum node from the terminal.
//!
//! Usage:
//! ```bash
//! # Head block number
//! ethrpc block-number --url http://127.0.0.1:8545
//!
//! # Send a raw JSON-RPC call
//! ethrpc call --method eth_getBalance --params '["0x407d73d8a49eeb85d32cf465507dd71d507100c1","latest"]'
//!
//! # Block 436 with full transactions, logging every exchange
//! ETHRPC_URL=http://127.0.0.1:8545 ethrpc block --number 436 --full --debug
//! ```

use std::env;
use std::process;

use anyhow::{bail, Context, Result};
use ethrpc::{BlockTag, BlockTransactions, EthRpc, SyncStatus};
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://127.0.0.1:8545";

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }
    init_tracing(has_flag(&args, "--verbose"), has_flag(&args, "--debug"));

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "call" => cmd_call(rest).await,
        "block-number" => cmd_block_number(rest).await,
        "balance" => cmd_balance(rest).await,
        "block" => cmd_block(rest).await,
        "syncing" => cmd_syncing(rest).await,
        "version" | "--version" | "-V" => {
            println!("ethrpc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("ethrpc {}", env!("CARGO_PKG_VERSION"));
    println!("Query an Ethereum node over JSON-RPC\n");
    println!("USAGE:");
    println!("    ethrpc <COMMAND> [FLAGS]\n");
    println!("COMMANDS:");
    println!("    call          Send a raw JSON-RPC call and print the result");
    println!("    block-number  Print the head block number");
    println!("    balance       Print an account balance in wei");
    println!("    block         Print a block summary");
    println!("    syncing       Print the node's sync status");
    println!("    version       Print version");
    println!("    help          Print this help\n");
    println!("COMMAND FLAGS:");
    println!("    call     --method <METHOD> [--params <JSON array>]");
    println!("    balance  --address <ADDRESS> [--block <latest|earliest|pending|N|0xN>]");
    println!("    block    --number <N> [--full]\n");
    println!("GLOBAL FLAGS:");
    println!("    --url <URL>   Node endpoint  [env: ETHRPC_URL] [default: {DEFAULT_URL}]");
    println!("    --debug       Log every request and raw response");
    println!("    --verbose     Debug-level logging (RUST_LOG overrides)");
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`. `--debug`
/// always lets exchange records through.
fn init_tracing(verbose: bool, debug: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if debug {
        if let Ok(directive) = "ethrpc::debug=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn client(args: &[String]) -> Result<EthRpc> {
    let url = parse_flag(args, "--url")
        .or_else(|| env::var("ETHRPC_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let client = EthRpc::builder(&url)
        .debug(has_flag(args, "--debug"))
        .build()
        .with_context(|| format!("cannot create client for {url}"))?;
    tracing::debug!(url = %url, "client created");
    Ok(client)
}

async fn cmd_call(args: &[String]) -> Result<()> {
    let method = parse_flag(args, "--method").context("--method is required")?;
    let params: Vec<serde_json::Value> = match parse_flag(args, "--params") {
        Some(raw) => serde_json::from_str(&raw).context("--params must be a JSON array")?,
        None => Vec::new(),
    };

    let result = client(args)?.dispatch(&method, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn cmd_block_number(args: &[String]) -> Result<()> {
    let number = client(args)?.eth().block_number().await?;
    println!("{number}");
    Ok(())
}

async fn cmd_balance(args: &[String]) -> Result<()> {
    let address = parse_flag(args, "--address").context("--address is required")?;
    let block: BlockTag = match parse_flag(args, "--block") {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid --block value: {raw}"))?,
        None => BlockTag::Latest,
    };

    let balance = client(args)?.eth().get_balance(&address, block).await?;
    println!("{balance}");
    Ok(())
}

async fn cmd_block(args: &[String]) -> Result<()> {
    let raw = parse_flag(args, "--number").context("--number is required")?;
    let number = match raw.parse::<BlockTag>() {
        Ok(BlockTag::Number(n)) => n,
        _ => bail!("--number must be a block number, got {raw}"),
    };
    let full = has_flag(args, "--full");

    let Some(block) = client(args)?.eth().get_block_by_number(number, full).await? else {
        bail!("block {number} not found");
    };

    let header = &block.header;
    println!("Block {}", header.number.map_or("pending".to_string(), |n| n.to_string()));
    println!("  Hash:         {}", header.hash.as_deref().unwrap_or("-"));
    println!("  Parent:       {}", header.parent_hash);
    println!("  Timestamp:    {}", header.timestamp);
    println!("  Miner:        {}", header.miner);
    println!("  Gas:          {} / {}", header.gas_used, header.gas_limit);
    println!("  Transactions: {}", block.transactions.len());
    match &block.transactions {
        BlockTransactions::Full(txs) => {
            for tx in txs {
                println!(
                    "    {}  {} -> {}  {} wei",
                    tx.hash,
                    tx.from,
                    tx.to.as_deref().unwrap_or("(create)"),
                    tx.value
                );
            }
        }
        BlockTransactions::Hashes(hashes) => {
            for hash in hashes {
                println!("    {hash}");
            }
        }
    }
    Ok(())
}

async fn cmd_syncing(args: &[String]) -> Result<()> {
    match client(args)?.eth().syncing().await? {
        SyncStatus::NotSyncing => println!("Not syncing"),
        SyncStatus::Syncing(p) => {
            println!("Syncing");
            println!("  Starting block: {}", p.starting_block);
            println!("  Current block:  {}", p.current_block);
            println!("  Highest block:  {}", p.highest_block);
        }
    }
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags() {
        let a = args(&["--url", "http://x", "--full"]);
        assert_eq!(parse_flag(&a, "--url").as_deref(), Some("http://x"));
        assert_eq!(parse_flag(&a, "--method"), None);
        assert_eq!(parse_flag(&args(&["--url"]), "--url"), None);
        assert!(has_flag(&a, "--full"));
        assert!(!has_flag(&a, "--debug"));
    }
}
