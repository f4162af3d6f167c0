use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use minigit_ref::RefStore;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct BranchArgs {
    /// Name of the branch to create; lists branches when omitted
    name: Option<String>,
}

pub fn run(args: &BranchArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;

    if let Some(name) = &args.name {
        repo.create_branch(name)?;
        return Ok(0);
    }

    let current = repo.current_branch()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for branch in repo.refs().list_branches()? {
        let marker = if branch == current { '*' } else { ' ' };
        writeln!(out, "{marker} {branch}")?;
    }
    Ok(0)
}
