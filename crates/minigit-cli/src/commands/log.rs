use std::io::{self, Write};

use anyhow::Result;
use bstr::ByteSlice;
use chrono::{DateTime, Utc};
use clap::Args;
use minigit_revwalk::FirstParentWalk;

use super::open_repo;
use crate::Cli;

#[derive(Args)]
pub struct LogArgs {
    /// Show only the first <n> commits
    #[arg(short = 'n', long = "max-count")]
    max_count: Option<usize>,

    /// Show one-line summary per commit
    #[arg(long)]
    oneline: bool,
}

pub fn run(args: &LogArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let walk = FirstParentWalk::new(repo.odb(), repo.head_commit()?);
    let limit = args.max_count.unwrap_or(usize::MAX);

    for (shown, entry) in walk.take(limit).enumerate() {
        let (oid, commit) = entry?;

        if args.oneline {
            writeln!(out, "{} {}", oid.to_short_hex(), commit.summary().as_bstr())?;
            continue;
        }

        if shown > 0 {
            writeln!(out)?;
        }
        writeln!(out, "commit {oid}")?;
        if commit.is_merge() {
            let parents: Vec<String> = commit.parents.iter().map(|p| p.to_short_hex()).collect();
            writeln!(out, "Merge: {}", parents.join(" "))?;
        }
        writeln!(out, "Author: {}", commit.author)?;
        writeln!(out, "Date:   {}", format_date(commit.timestamp))?;
        writeln!(out)?;
        for line in commit.message.lines() {
            writeln!(out, "    {}", line.as_bstr())?;
        }
    }

    Ok(0)
}

fn format_date(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(date) => date.format("%a %b %e %H:%M:%S %Y +0000").to_string(),
        None => timestamp.to_string(),
    }
}
