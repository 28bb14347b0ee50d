use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "llm-translator")]
#[command(about = "Translate Chinese to English with keyword extraction using an LLM.")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Print a configuration diagnostic report and exit
    #[arg(long)]
    pub check_config: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,
}
