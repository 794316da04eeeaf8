use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "cisco-aaa-exec")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Compile and check cisco_aaa_authorization_login_exec_svc resources",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate every resource declared in a manifest
    Validate(ManifestArgs),

    /// Show the autorequire edges of each exec login service
    Deps(DepsArgs),

    /// Compare declared state with observed device state
    Diff(DiffArgs),

    /// Describe the resource type and its attributes
    Describe,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ManifestArgs {
    /// Manifest to load (default: ~/.config/cisco-aaa-exec/manifest.toml)
    #[arg(short, long, env = "CISCO_AAA_EXEC_MANIFEST")]
    pub manifest: Option<String>,
}

#[derive(Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Print edges as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Observed device state, in manifest format
    #[arg(short, long)]
    pub observed: String,

    /// Print diffs as JSON
    #[arg(long)]
    pub json: bool,
}
