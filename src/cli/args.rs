use crate::core::SourceLanguage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "untangle-eval")]
#[command(about = "Evaluate commit untangling results against ground truth", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .untangle-eval.toml)
    #[arg(long, global = true, env = "UNTANGLE_EVAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Color the nodes of a PDG that overlap the lines of a diff
    Mark {
        /// Graph to annotate (Graphviz DOT)
        pdg: PathBuf,

        /// Unified diff of the change
        diff: PathBuf,

        /// Source language of the change (java, csharp)
        #[arg(short, long)]
        language: Option<SourceLanguage>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Flatten an annotated PDG into a per-line results CSV
    Flatten {
        /// Annotated graph (Graphviz DOT)
        pdg: PathBuf,

        /// Results file (defaults to the results file name next to the graph)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute the Rand Index of one results CSV
    Score {
        /// Results CSV produced by `flatten`
        csv: PathBuf,

        /// Also write the score to a scores file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the score record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flatten and score every change below a directory
    Batch {
        /// Directory holding one folder per change
        root: PathBuf,

        /// Scores file (relative paths are resolved against ROOT)
        scores: PathBuf,

        /// Graph file name to look for
        #[arg(long = "graph-name")]
        graph_name: Option<String>,

        /// Number of parallel jobs (0 = use all cores)
        #[arg(short = 'j', long = "jobs")]
        jobs: Option<usize>,

        /// Disable parallel processing
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Hide the progress bar
        #[arg(long = "no-progress")]
        no_progress: bool,
    },

    /// Write a default .untangle-eval.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
