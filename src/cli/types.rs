use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "imgtools",
    version,
    about = "Command-line client for the imgtools image processing API"
)]
pub(super) struct Cli {
    /// Client configuration file (JSON, or YAML by extension).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    /// Overrides the configured API base URL.
    #[arg(long, global = true)]
    pub(super) base_url: Option<String>,

    /// Bearer token sent with processing requests.
    #[arg(long, global = true)]
    pub(super) token: Option<String>,

    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub(super) verbose: u8,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },
    /// Sends one image (or two, for blending) to a tool and saves the result.
    Process(ProcessArgs),
    /// Prints the data URL preview of a local image.
    Preview {
        input: PathBuf,
    },
    /// Validates an image URL and checks that it actually loads.
    CheckUrl {
        url: String,
    },
    /// Runs every step of a job file.
    Run {
        #[arg(long)]
        job: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Steps through images with key names read from stdin
    /// (ArrowLeft, ArrowRight, Escape).
    Gallery {
        #[arg(required = true)]
        images: Vec<String>,
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
}

#[derive(Debug, Subcommand)]
pub(super) enum ToolsCommand {
    List,
    Show { tool: String },
}

#[derive(Debug, Args)]
pub(super) struct ProcessArgs {
    pub(super) tool: String,

    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    pub(super) file: Option<PathBuf>,

    #[arg(long)]
    pub(super) url: Option<String>,

    #[arg(long, conflicts_with = "overlay_url")]
    pub(super) overlay_file: Option<PathBuf>,

    #[arg(long)]
    pub(super) overlay_url: Option<String>,

    /// Tool setting as `name=value`; may be repeated.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub(super) settings: Vec<String>,

    /// Sends every declared setting, using defaults for those not set.
    #[arg(long)]
    pub(super) defaults: bool,

    #[arg(long, short)]
    pub(super) output: PathBuf,
}
