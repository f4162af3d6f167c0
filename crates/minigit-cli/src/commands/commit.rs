use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use minigit_index::IndexStore;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short = 'm', long = "message")]
    message: String,
}

pub fn run(args: &CommitArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let staging = repo.index().load()?;
    let branch = repo.current_branch()?;
    let oid = repo.commit(&staging, &args.message)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = args.message.lines().next().unwrap_or("");
    writeln!(out, "[{} {}] {}", branch, oid.to_short_hex(), summary)?;
    Ok(0)
}
