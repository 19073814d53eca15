use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "vocabvault",
    version,
    about = "Word of the day and vocabulary lists in your terminal"
)]
pub struct Args {
    /// Config file to read instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the vocabulary backend URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the local account database path
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,
}
