use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch to switch to
    branch: String,
}

pub fn run(args: &CheckoutArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    repo.checkout(&args.branch)?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    writeln!(err, "Switched to branch '{}'", args.branch)?;
    Ok(0)
}
