// Entry point for the ledger CLI: builds chains in memory and prints them
use clap::Parser;
use hashlink_ledger::cli::{overwrite_data, render_json, render_text, validity_line};
use hashlink_ledger::{Chain, Command, Config, LedgerError, Opt};
use log::{error, info};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process;

const FIRST_BLOCK_DATA: &str = "First block data";
const SECOND_BLOCK_DATA: &str = "Second block data";
const TAMPERED_DATA: &str = "Tampered";

fn main() {
    let opt = Opt::parse();

    let config = match Config::load(opt.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // RUST_LOG still wins over the configured level
    env_logger::builder()
        .filter_level(config.log_level_filter().unwrap_or(log::LevelFilter::Info))
        .parse_default_env()
        .init();

    match run_command(opt.command, &config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Runs one command; `Ok(false)` means a chain was checked and found invalid
fn run_command(command: Command, config: &Config) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Demo { tamper, json } => {
            let mut chain = new_chain(config)?;
            chain.append_block(FIRST_BLOCK_DATA)?;
            chain.append_block(SECOND_BLOCK_DATA)?;
            print_chain(&chain, config, json)?;

            if tamper {
                info!("Overwriting block 2 payload with {TAMPERED_DATA:?}");
                let tampered = overwrite_data(&chain, 2, Value::from(TAMPERED_DATA))?;
                print_chain(&tampered, config, json)?;
            }
        }
        Command::Build { data, json } => {
            let mut chain = new_chain(config)?;
            for payload in &data {
                chain.append_block(payload.as_str())?;
            }
            print_chain(&chain, config, json)?;
        }
        Command::Verify { file } => {
            let chain = read_chain(&file)?;
            let result = chain.verify();
            println!("Blocks: {}", chain.len());
            println!("Is blockchain valid? {}", result.is_ok());
            if let Err(fault) = result {
                println!("First fault: {fault}");
                return Ok(false);
            }
        }
    }
    Ok(true)
}

fn new_chain(config: &Config) -> Result<Chain, LedgerError> {
    let timestamp = hashlink_ledger::current_timestamp()?;
    Chain::with_genesis(config.genesis_data.as_str(), timestamp)
}

fn print_chain(chain: &Chain, config: &Config, json: bool) -> Result<(), LedgerError> {
    if json {
        println!("{}", render_json(chain)?);
    } else {
        print!("{}", render_text(chain, &config.separator()));
        println!("{}", validity_line(chain));
    }
    Ok(())
}

fn read_chain(path: &Path) -> Result<Chain, LedgerError> {
    let text = fs::read_to_string(path)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&text)?;
    // Accept both a bare block array and the `--json` report object
    let blocks = match value {
        Value::Object(mut report) => report.remove("blocks").unwrap_or(Value::Null),
        other => other,
    };
    Ok(serde_json::from_value(blocks)?)
}
