use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use minigit_hash::ObjectId;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct CatFileArgs {
    /// Object ID (40 hex characters)
    #[arg(value_name = "object")]
    object: String,
}

pub fn run(args: &CatFileArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let oid: ObjectId = args.object.parse()?;
    let content = repo.odb().read_raw(&oid)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(&content)?;
    Ok(0)
}
