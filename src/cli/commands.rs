use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "hashlink-ledger", about = "Hash-linked append-only ledger")]
pub struct Opt {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "demo",
        about = "Build the two-block sample chain and check it"
    )]
    Demo {
        #[arg(long, help = "Overwrite block 2's payload afterwards and check again")]
        tamper: bool,
        #[arg(long, help = "Print the chain as JSON")]
        json: bool,
    },
    #[command(name = "build", about = "Append each argument as a block and print the chain")]
    Build {
        #[arg(required = true, help = "Block payloads, in order")]
        data: Vec<String>,
        #[arg(long, help = "Print the chain as JSON")]
        json: bool,
    },
    #[command(name = "verify", about = "Check a chain exported as JSON")]
    Verify {
        #[arg(help = "Path to the exported chain")]
        file: PathBuf,
    },
}
