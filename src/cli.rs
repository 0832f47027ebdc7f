use crate::inspect::{inspect, InspectOptions, InspectionReport};
use crate::output::{output_json, output_ndjson, output_summary};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cqi")]
#[command(about = "Code quality metrics for a git repository and its history")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Format commit dates in UTC instead of local time", default_value_t = false)]
    pub utc: bool,

    #[arg(long, help = "Hide the progress bar", default_value_t = false)]
    pub no_progress: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    pub verbose: u8,
}

#[derive(Args, Clone)]
pub struct HistoryArgs {
    #[arg(long, help = "Also inspect the commit history")]
    pub history: bool,

    #[arg(
        long,
        help = "Inspect at most this many recent commits (0 = all)",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    pub max_history: i64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the repository and write CSV reports
    Inspect {
        #[arg(long, short, help = "Directory for the CSV reports", default_value = "metrics")]
        output: PathBuf,

        #[clap(flatten)]
        history: HistoryArgs,

        #[arg(long, help = "Print the results as JSON instead of a summary")]
        json: bool,
    },
    /// Inspect the repository and print the results without writing files
    Show {
        #[clap(flatten)]
        history: HistoryArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output per-file metrics as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Inspect { output, history, json } => {
                let report = run(&self.common, &history)?;
                report
                    .export(&output)
                    .with_context(|| format!("Failed to write reports to {}", output.display()))?;
                if json {
                    output_json(&report)
                } else {
                    output_summary(&report, Some(output.as_path()))
                }
            }
            Commands::Show { history, json, ndjson } => {
                let report = run(&self.common, &history)?;
                if json {
                    output_json(&report)
                } else if ndjson {
                    output_ndjson(&report)
                } else {
                    output_summary(&report, None)
                }
            }
        }
    }
}

fn run(common: &CommonArgs, history: &HistoryArgs) -> Result<InspectionReport> {
    let repo = match &common.repo {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let options = InspectOptions {
        inspect_history: history.history,
        max_history_count: history.max_history,
        utc: common.utc,
        progress: !common.no_progress && console::Term::stderr().is_term(),
    };
    inspect(&repo, &options).context("Failed to inspect repository")
}
