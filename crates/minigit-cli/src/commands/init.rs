use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use minigit_repository::Repository;

use crate::Cli;

#[derive(Args)]
pub struct InitArgs {
    /// Be quiet, only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Directory to create the repository in
    directory: Option<PathBuf>,
}

pub fn run(args: &InitArgs, _cli: &Cli) -> Result<i32> {
    let target = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let repo = Repository::init(&target)?;

    if !args.quiet {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(
            out,
            "Initialized empty minigit repository in {}",
            repo.git_dir().display()
        )?;
    }

    Ok(0)
}
