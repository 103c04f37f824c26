use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "relatos",
    version,
    about = "Parse retrospective reports into scored records and aggregates"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Parse(ParseArgs),
    Load(LoadArgs),
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "data/relatos")]
    pub relatos_dir: PathBuf,

    #[arg(long, default_value = "data/manifests")]
    pub manifest_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    #[arg(long, default_value = "data/relatos")]
    pub relatos_dir: PathBuf,

    #[arg(long, default_value = "data/manifests")]
    pub manifest_dir: PathBuf,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long, default_value = "data/relatos")]
    pub relatos_dir: PathBuf,

    #[arg(long = "period")]
    pub periods: Vec<String>,

    /// Display name, tagged label (`SPACE-C (...)`) or code letter.
    #[arg(long = "dimension")]
    pub dimensions: Vec<String>,

    #[arg(long)]
    pub detail_dimension: Option<String>,

    #[arg(long)]
    pub artifact: Option<String>,

    #[arg(long, default_value_t = false)]
    pub include_activity: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
