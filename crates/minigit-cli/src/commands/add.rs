use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use minigit_index::IndexStore;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct AddArgs {
    /// Files or directories to stage
    #[arg(required = true, value_name = "pathspec")]
    paths: Vec<PathBuf>,
}

pub fn run(args: &AddArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let cwd = std::env::current_dir()?;

    // Paths on the command line are relative to where we were started,
    // not to the work tree root.
    let paths: Vec<PathBuf> = args.paths.iter().map(|p| cwd.join(p)).collect();

    let staging = repo.index().load()?;
    repo.add(staging, &paths)?;
    Ok(0)
}
