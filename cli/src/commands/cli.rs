use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "gridstart",
    version,
    about = "Installs the post-execution verification directive of a workflow job"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file. Defaults to ~/.gridstart/config.toml, then ./config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the postscript of a job and print its DAGMan profile.
    Construct(ConstructArgs),
    /// List the postscript kinds.
    Kinds,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConstructArgs {
    /// Job description (TOML, or JSON when the file ends in .json).
    #[arg(long)]
    pub job: PathBuf,

    /// Postscript kind, overriding the job's POST profile.
    #[arg(long)]
    pub kind: Option<String>,

    /// Tool path for jobs without a POST.PATH.<kind> profile.
    #[arg(long)]
    pub path: Option<String>,

    #[arg(long)]
    pub submit_dir: Option<String>,

    /// DAGMan profile key the tool path is written under.
    #[arg(long, default_value = "POST")]
    pub key: String,

    /// Extra planner properties (KEY=VALUE). Can be specified multiple times.
    #[arg(long = "set", action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
