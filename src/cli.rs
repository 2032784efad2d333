use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dualrev — run two AI reviewer CLIs over a git diff and reconcile their
/// findings into a single trust score and report
#[derive(Parser, Debug, Clone)]
#[command(name = "dualrev", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Review the unstaged diff instead of the staged one
    #[arg(long, global = true)]
    pub unstaged: bool,

    /// Repository directory to diff (default: current directory)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Primary reviewer binary (default: claude)
    #[arg(long)]
    pub primary: Option<String>,

    /// Secondary reviewer binary (default: cursor)
    #[arg(long)]
    pub secondary: Option<String>,

    /// Model for the primary reviewer
    #[arg(long)]
    pub primary_model: Option<String>,

    /// Model for the secondary reviewer
    #[arg(long)]
    pub secondary_model: Option<String>,

    /// Flag name used to pass the prompt (default: -p)
    #[arg(long)]
    pub prompt_arg: Option<String>,

    /// Args requesting JSON output, repeatable (default: --output-format json)
    #[arg(long = "output-json-arg", allow_hyphen_values = true)]
    pub output_json_args: Vec<String>,

    /// Flag name used to pass the model (default: --model)
    #[arg(long)]
    pub model_arg: Option<String>,

    /// Additional reviewer CLI args, repeatable
    #[arg(long = "extra-arg", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,

    /// Reviewer timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Report the diff size and exit without invoking any reviewer
    #[arg(long)]
    pub dry_run: bool,

    /// Path to config file (default: dualrev.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Reconcile two saved reviewer outputs instead of running reviewers
    Compare {
        /// File holding the first reviewer's raw output
        #[arg(long)]
        a: PathBuf,

        /// File holding the second reviewer's raw output
        #[arg(long)]
        b: PathBuf,
    },

    /// Print the diff that would be reviewed
    Diff,
}
