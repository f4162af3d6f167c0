use bstr::BString;
use minigit_hash::ObjectId;
use minigit_index::{IndexStore, StagingArea};
use minigit_object::Commit;
use minigit_odb::ObjectDatabase;
use minigit_ref::RefStore;
use minigit_repository::{checkout_files, Repository, WorkingTree};
use minigit_revwalk::find_common_ancestor;
use tracing::{debug, info};

use crate::three_way::merge_file_maps;
use crate::{MergeError, MergeOutcome, MergeReport};

/// Merges a branch into the current one.
///
/// Every collaborator is borrowed, so the engine works the same over an
/// on-disk [`Repository`] or in-memory stores.
pub struct MergeEngine<'a> {
    odb: &'a ObjectDatabase,
    refs: &'a dyn RefStore,
    index: &'a dyn IndexStore,
    worktree: &'a dyn WorkingTree,
    identity: BString,
}

impl<'a> MergeEngine<'a> {
    pub fn new(
        odb: &'a ObjectDatabase,
        refs: &'a dyn RefStore,
        index: &'a dyn IndexStore,
        worktree: &'a dyn WorkingTree,
        identity: impl Into<BString>,
    ) -> Self {
        Self {
            odb,
            refs,
            index,
            worktree,
            identity: identity.into(),
        }
    }

    /// An engine over a repository's own stores and identity.
    pub fn for_repository(repo: &'a Repository) -> Self {
        Self::new(repo.odb(), repo.refs(), repo.index(), repo.worktree(), repo.identity())
    }

    /// Merge `target` into the current branch.
    ///
    /// `staging` is returned untouched unless the merge got far enough to
    /// rewrite the working tree, in which case the merged snapshot replaces it.
    pub fn merge(&self, target: &str, staging: StagingArea) -> Result<MergeReport, MergeError> {
        let incoming_tip = self
            .refs
            .branch_tip(target)?
            .ok_or_else(|| MergeError::BranchNotFound(target.to_string()))?;
        let current = self.refs.current_branch()?;
        let current_tip = self
            .refs
            .branch_tip(&current)?
            .ok_or_else(|| MergeError::EmptyHistory(current.clone()))?;

        if current_tip == incoming_tip {
            debug!(%target, %current, "already up to date");
            return Ok(MergeReport {
                outcome: MergeOutcome::AlreadyUpToDate,
                staging,
            });
        }

        let ancestor = find_common_ancestor(self.odb, &current_tip, &incoming_tip)?.ok_or(
            MergeError::NoCommonAncestor {
                current: current_tip,
                incoming: incoming_tip,
            },
        )?;
        debug!(%ancestor, current = %current_tip, incoming = %incoming_tip, "merging");

        let base = self.snapshot(&ancestor)?;
        let ours = self.snapshot(&current_tip)?;
        let theirs = self.snapshot(&incoming_tip)?;
        let result = merge_file_maps(&base, &ours, &theirs);

        if !result.is_clean() {
            let staging = self.sync(result.merged)?;
            info!(%target, conflicts = result.conflicts.len(), "merge stopped with conflicts");
            return Ok(MergeReport {
                outcome: MergeOutcome::Conflicted {
                    conflicts: result.conflicts,
                },
                staging,
            });
        }

        let tree = self.odb.encode_tree(&result.merged)?;
        let commit = Commit {
            tree,
            parents: vec![current_tip, incoming_tip],
            author: self.identity.clone(),
            committer: self.identity.clone(),
            timestamp: 0,
            message: format!("Merge branch '{target}' into {current}").into(),
        };
        let commit = self.odb.encode_commit(&commit)?;
        self.refs.advance(&current, &commit)?;
        let staging = self.sync(result.merged)?;

        info!(%target, %current, %commit, "merged");
        Ok(MergeReport {
            outcome: MergeOutcome::Merged { commit, tree },
            staging,
        })
    }

    fn snapshot(&self, commit: &ObjectId) -> Result<minigit_object::FileMap, MergeError> {
        let commit = self.odb.decode_commit(commit)?;
        Ok(self.odb.decode_snapshot(commit.tree.as_ref())?)
    }

    /// Write `files` to the working tree and make them the staging area.
    fn sync(&self, files: minigit_object::FileMap) -> Result<StagingArea, MergeError> {
        checkout_files(self.worktree, self.odb, &files)?;
        let staging = StagingArea::from(files);
        self.index.save(&staging)?;
        Ok(staging)
    }
}
