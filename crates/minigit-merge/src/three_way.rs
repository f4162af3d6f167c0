//! Path-by-path three-way reconciliation of flat file maps.

use std::collections::BTreeSet;

use bstr::BString;
use minigit_hash::ObjectId;
use minigit_object::FileMap;

use crate::ConflictEntry;

/// The merged snapshot and the paths that conflicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMapMerge {
    pub merged: FileMap,
    pub conflicts: Vec<ConflictEntry>,
}

impl FileMapMerge {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn conflicted_paths(&self) -> impl Iterator<Item = &BString> {
        self.conflicts.iter().map(|c| &c.path)
    }
}

/// Pick a version of one path. `Err` carries current's version for a
/// conflict.
fn resolve(
    base: Option<ObjectId>,
    ours: Option<ObjectId>,
    theirs: Option<ObjectId>,
) -> Result<Option<ObjectId>, Option<ObjectId>> {
    if base == ours {
        // Unchanged here, so take theirs; this also carries deletions.
        Ok(theirs)
    } else if base == theirs || ours == theirs {
        Ok(ours)
    } else {
        Err(ours)
    }
}

/// Merge `ours` and `theirs` against `base`.
///
/// Absent paths count as a value: deleting on one side while the other
/// leaves the path alone deletes it; deleting on one side while the other
/// modifies it is a conflict.
pub fn merge_file_maps(base: &FileMap, ours: &FileMap, theirs: &FileMap) -> FileMapMerge {
    let paths: BTreeSet<&BString> = base.keys().chain(ours.keys()).chain(theirs.keys()).collect();

    let mut result = FileMapMerge::default();
    for path in paths {
        let b = base.get(path).copied();
        let o = ours.get(path).copied();
        let t = theirs.get(path).copied();

        let chosen = match resolve(b, o, t) {
            Ok(chosen) => chosen,
            Err(kept) => {
                result.conflicts.push(ConflictEntry {
                    path: path.clone(),
                    base: b,
                    ours: o,
                    theirs: t,
                });
                kept
            }
        };
        if let Some(oid) = chosen {
            result.merged.insert(path.clone(), oid);
        }
    }
    result
}
