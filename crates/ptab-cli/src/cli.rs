use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ptab_diff::ViewFilter;

#[derive(Parser)]
#[command(
    name = "ptab",
    about = "Price table versions: import, list and compare",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the stored versions
    #[arg(long, global = true, default_value = ".ptab")]
    pub root: PathBuf,

    /// Configuration file (defaults to `<root>/config.toml`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.root.join("config.toml"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a sheet exported as JSON and save it as a version
    Import(ImportArgs),
    /// List stored versions, newest first
    List(ListArgs),
    /// Show one version
    Show(ShowArgs),
    /// Compare two versions
    Compare(CompareArgs),
    /// Delete a version
    Delete(DeleteArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON file: an array of records or an array of sheet rows
    pub file: PathBuf,
    /// Version name (defaults to `category_partner_region_(YYYY_MM_DD)`)
    #[arg(long)]
    pub name: Option<String>,
    /// Overwrite this version id instead of deriving one from the name
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub partner: String,
    #[arg(long, default_value = "")]
    pub region: String,
}

#[derive(Args)]
pub struct ListArgs {}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Old version id
    pub left: String,
    /// New version id
    pub right: String,
    #[arg(long, default_value = "all")]
    pub filter: ViewFilter,
    /// Also list rows without differences under `all`
    #[arg(long)]
    pub include_unchanged: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ConfigArgs {}
