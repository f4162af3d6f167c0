pub mod add;
pub mod branch;
pub mod cat_file;
pub mod checkout;
pub mod commit;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod merge;

use anyhow::Result;
use clap::Subcommand;
use minigit_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository
    Init(init::InitArgs),
    /// Add file contents to the staging area
    Add(add::AddArgs),
    /// Record the staging area as a new commit
    Commit(commit::CommitArgs),
    /// List or create branches
    Branch(branch::BranchArgs),
    /// Switch branches
    Checkout(checkout::CheckoutArgs),
    /// Show commit logs along first parents
    Log(log::LogArgs),
    /// Print the raw content of a stored object
    CatFile(cat_file::CatFileArgs),
    /// Compute a blob ID and optionally store it
    HashObject(hash_object::HashObjectArgs),
    /// Join another branch into the current one
    Merge(merge::MergeArgs),
}

pub fn open_repo(_cli: &Cli) -> Result<Repository> {
    Ok(Repository::discover(".")?)
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args, &cli),
        Commands::Add(args) => add::run(args, &cli),
        Commands::Commit(args) => commit::run(args, &cli),
        Commands::Branch(args) => branch::run(args, &cli),
        Commands::Checkout(args) => checkout::run(args, &cli),
        Commands::Log(args) => log::run(args, &cli),
        Commands::CatFile(args) => cat_file::run(args, &cli),
        Commands::HashObject(args) => hash_object::run(args, &cli),
        Commands::Merge(args) => merge::run(args, &cli),
    }
}
