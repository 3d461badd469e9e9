use std::path::PathBuf;

use cairn_types::{ObjectId, ObjectKind};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cairn",
    about = "Cairn: content-addressed object store and directory snapshots",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log store and snapshot activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory to start repository discovery from
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init(InitArgs),
    /// Compute object IDs and optionally write objects
    HashObject(HashObjectArgs),
    /// Print the content of an object
    CatFile(CatFileArgs),
    /// Snapshot the working directory into tree objects
    WriteTree(WriteTreeArgs),
    /// List the entries of a tree object
    LsTree(LsTreeArgs),
    /// Rehash stored objects and compare with their IDs
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Where to create the repository (defaults to --dir)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashObjectArgs {
    /// Object kind: blob, tree, commit or tag
    #[arg(short = 't', long = "type", default_value = "blob")]
    pub kind: ObjectKind,
    /// Write the object to the object store
    #[arg(short, long)]
    pub write: bool,
    /// Read one object from standard input
    #[arg(long)]
    pub stdin: bool,
    /// Files to hash
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CatFileArgs {
    /// Pretty-print the object whatever its kind
    #[arg(short, long)]
    pub pretty: bool,
    /// `<TYPE> <OBJECT>`, or just `<OBJECT>` with -p
    #[arg(required = true, num_args = 1..=2, value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct WriteTreeArgs {
    /// Snapshot this directory, relative to the repository root, instead of the root
    #[arg(long)]
    pub prefix: Option<PathBuf>,
}

#[derive(Args)]
pub struct LsTreeArgs {
    pub tree: ObjectId,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(required = true)]
    pub objects: Vec<ObjectId>,
}
