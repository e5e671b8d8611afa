use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use delta_types::CanonicalHash;
use serde::Deserialize;

#[derive(Parser)]
#[command(
    name = "delta",
    about = "Delta: structural diffs and canonical hashes for JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides `[output] format` in the config file
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (defaults to ./delta.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the canonical hash of a JSON document
    Hash(HashArgs),
    /// Check a JSON document against an expected canonical hash
    Verify(VerifyArgs),
    /// Print the canonical form of a JSON document
    Canonical(CanonicalArgs),
    /// Show the member-level diff between two JSON records
    Diff(DiffArgs),
    /// Apply a diff to a JSON record
    Patch(PatchArgs),
}

#[derive(Args)]
pub struct HashArgs {
    pub path: PathBuf,
    /// Domain tag mixed into the digest
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub path: PathBuf,
    /// Expected hash, as printed by `delta hash`
    pub expected: CanonicalHash,
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Args)]
pub struct CanonicalArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    /// Members to leave out of the comparison
    #[arg(long)]
    pub ignore: Vec<String>,
    /// Schema name given to both records
    #[arg(long)]
    pub schema: Option<String>,
}

#[derive(Args)]
pub struct PatchArgs {
    pub target: PathBuf,
    pub diff: PathBuf,
    /// Write the patched record here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub schema: Option<String>,
}
