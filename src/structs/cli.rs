use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "gemini-actions")]
#[clap(about = "Gemini-powered GitHub repository automation", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
