use std::io::{self, Write};

use anyhow::Result;
use bstr::ByteSlice;
use clap::Args;
use minigit_index::IndexStore;
use minigit_merge::{MergeEngine, MergeOutcome};

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct MergeArgs {
    /// Branch to merge into the current branch
    branch: String,
}

pub fn run(args: &MergeArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let staging = repo.index().load()?;
    let report = MergeEngine::for_repository(&repo).merge(&args.branch, staging)?;

    match report.outcome {
        MergeOutcome::AlreadyUpToDate => {
            writeln!(out, "Already up to date.")?;
            Ok(0)
        }
        MergeOutcome::Merged { commit, .. } => {
            writeln!(out, "Merge made by the 'three-way' strategy.")?;
            writeln!(out, "[{} {}]", repo.current_branch()?, commit.to_short_hex())?;
            Ok(0)
        }
        MergeOutcome::Conflicted { conflicts } => {
            for conflict in &conflicts {
                writeln!(err, "CONFLICT (content): Merge conflict in {}", conflict.path.as_bstr())?;
            }
            writeln!(
                err,
                "Automatic merge failed; kept the current version of {} file(s).",
                conflicts.len()
            )?;
            Ok(1)
        }
    }
}
