use chrono::Utc;
use minigit_hash::ObjectId;
use minigit_object::Commit;
use tracing::debug;

use crate::{ObjectDatabase, OdbError};

impl ObjectDatabase {
    /// Serialize and store a commit, stamped with the current time.
    ///
    /// The commit's own `timestamp` is ignored; the stored text always
    /// carries the time of this call.
    pub fn encode_commit(&self, commit: &Commit) -> Result<ObjectId, OdbError> {
        self.encode_commit_at(commit, Utc::now().timestamp())
    }

    /// Like [`encode_commit`](Self::encode_commit) with an explicit time.
    pub fn encode_commit_at(&self, commit: &Commit, now: i64) -> Result<ObjectId, OdbError> {
        let oid = self.write_raw(&commit.serialize_at(now))?;
        debug!(%oid, parents = commit.parents.len(), "stored commit");
        Ok(oid)
    }

    /// Read and parse the commit at `oid`.
    pub fn decode_commit(&self, oid: &ObjectId) -> Result<Commit, OdbError> {
        let content = self.read_raw(oid)?;
        Ok(Commit::parse(&content, Utc::now().timestamp())?)
    }
}
