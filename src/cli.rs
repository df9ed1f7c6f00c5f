use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "market-pulse")]
#[command(about = "Stock indicator reports and market-fall alerts over Telegram", long_about = None)]
pub struct Cli {
    /// Optional JSON config file; environment variables override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run stock market analysis
    Stock,
    /// Run market fall check
    Marketfall,
}
