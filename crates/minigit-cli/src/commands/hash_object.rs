use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use minigit_hash::{Hasher, ObjectId};
use minigit_repository::Repository;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Read the object from stdin
    #[arg(long)]
    stdin: bool,

    /// Actually write the object into the object store
    #[arg(short = 'w')]
    write: bool,

    /// Files to hash
    #[arg(value_name = "file")]
    files: Vec<PathBuf>,
}

pub fn run(args: &HashObjectArgs, cli: &Cli) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // We only need a repo if writing
    let repo = if args.write { Some(open_repo(cli)?) } else { None };

    if args.stdin {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        let oid = hash_and_maybe_write(&data, repo.as_ref())?;
        writeln!(out, "{oid}")?;
    }

    for file in &args.files {
        let data = std::fs::read(file)
            .with_context(|| format!("could not read '{}'", file.display()))?;
        let oid = hash_and_maybe_write(&data, repo.as_ref())?;
        writeln!(out, "{oid}")?;
    }

    Ok(0)
}

fn hash_and_maybe_write(data: &[u8], repo: Option<&Repository>) -> Result<ObjectId> {
    match repo {
        Some(repo) => Ok(repo.odb().write_blob(data)?),
        None => Ok(Hasher::digest(data)?),
    }
}
