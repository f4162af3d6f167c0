//! Repository discovery, initialization, and central access for all minigit
//! subsystems.
//!
//! A [`Repository`] ties together the object database, the branch refs, the
//! staging index, the working tree and the configuration, and implements the
//! everyday snapshot operations on top of them: staging files, committing,
//! creating branches and switching between them.

mod config;
mod discover;
mod env;
mod error;
mod init;
mod worktree;

pub use config::Config;
pub use env::EnvOverrides;
pub use error::RepoError;
pub use worktree::{checkout_files, FsWorkingTree, MemoryWorkingTree, WorkingTree};

use std::fs;
use std::path::{Path, PathBuf};

use bstr::BString;
use chrono::Utc;
use minigit_hash::ObjectId;
use minigit_index::{FileIndexStore, IndexStore, StagingArea};
use minigit_object::{Commit, FileMap};
use minigit_odb::ObjectDatabase;
use minigit_ref::{FilesRefStore, RefStore};
use tracing::{debug, info, warn};

/// Name of the metadata directory at the top of a working tree.
pub const GIT_DIR_NAME: &str = ".minigit";

const DEFAULT_NAME: &str = "minigit";
const DEFAULT_EMAIL: &str = "minigit@localhost";

pub struct Repository {
    /// Path to the .minigit directory.
    git_dir: PathBuf,
    /// Path to the working tree.
    work_tree: PathBuf,
    odb: ObjectDatabase,
    refs: FilesRefStore,
    index: FileIndexStore,
    worktree: FsWorkingTree,
    config: Config,
    env: EnvOverrides,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("git_dir", &self.git_dir)
            .field("work_tree", &self.work_tree)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open an existing repository.
    ///
    /// `path` should point to either the `.minigit` directory or the working
    /// tree root.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let layout = discover::open(path.as_ref())?;
        Self::from_layout(layout, EnvOverrides::from_env())
    }

    /// Discover a repository starting from the given directory, walking up.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        Self::discover_with_env(start, EnvOverrides::from_env())
    }

    /// Discover with explicit environment overrides.
    pub fn discover_with_env(start: impl AsRef<Path>, env: EnvOverrides) -> Result<Self, RepoError> {
        let layout = discover::discover(start.as_ref(), &env)?;
        Self::from_layout(layout, env)
    }

    /// Initialize a new repository at the given path, creating the
    /// directory if needed.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(RepoError::io(path))?;
        init::init_repository(path)?;
        Self::open(path)
    }

    fn from_layout(layout: discover::Layout, env: EnvOverrides) -> Result<Self, RepoError> {
        let discover::Layout { git_dir, work_tree } = layout;
        let config = Config::load(&git_dir.join("config"))?;
        debug!(git_dir = %git_dir.display(), "opened repository");
        Ok(Self {
            odb: ObjectDatabase::open(git_dir.join("objects")),
            refs: FilesRefStore::new(&git_dir),
            index: FileIndexStore::new(git_dir.join("index")),
            worktree: FsWorkingTree::new(&work_tree, &git_dir),
            config,
            env,
            git_dir,
            work_tree,
        })
    }

    // --- Path accessors ---

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    // --- Subsystem accessors ---

    pub fn odb(&self) -> &ObjectDatabase {
        &self.odb
    }

    pub fn refs(&self) -> &FilesRefStore {
        &self.refs
    }

    pub fn index(&self) -> &FileIndexStore {
        &self.index
    }

    pub fn worktree(&self) -> &FsWorkingTree {
        &self.worktree
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // --- Convenience methods ---

    /// The `Name <email>` recorded on commits.
    ///
    /// Environment overrides beat `[user]` config, which beats the defaults.
    pub fn identity(&self) -> BString {
        let name = self
            .env
            .author_name
            .as_deref()
            .or_else(|| self.config.get("user.name"))
            .unwrap_or(DEFAULT_NAME);
        let email = self
            .env
            .author_email
            .as_deref()
            .or_else(|| self.config.get("user.email"))
            .unwrap_or(DEFAULT_EMAIL);
        BString::from(format!("{name} <{email}>"))
    }

    pub fn current_branch(&self) -> Result<String, RepoError> {
        Ok(self.refs.current_branch()?)
    }

    pub fn head_commit(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs.head_commit()?)
    }

    /// The snapshot recorded by `commit`.
    pub fn files_at(&self, commit: &ObjectId) -> Result<FileMap, RepoError> {
        let commit = self.odb.decode_commit(commit)?;
        Ok(self.odb.decode_snapshot(commit.tree.as_ref())?)
    }

    // --- Snapshot operations ---

    /// Stage files. Directories are added recursively.
    ///
    /// Relative paths are taken from the working tree root.
    pub fn add(
        &self,
        mut staging: StagingArea,
        paths: &[PathBuf],
    ) -> Result<StagingArea, RepoError> {
        for path in paths {
            let joined = if path.is_absolute() {
                path.clone()
            } else {
                self.work_tree.join(path)
            };
            let full = fs::canonicalize(&joined).map_err(|_| RepoError::PathNotFound(path.clone()))?;
            if full.starts_with(&self.git_dir) {
                warn!(path = %path.display(), "ignoring path inside the repository metadata");
                continue;
            }

            let files = if full.is_dir() {
                self.worktree.files_under(&full)?
            } else {
                vec![self.worktree.relative_path(&full)?]
            };
            for file in files {
                let content = self.worktree.read_file(&file)?;
                let oid = self.odb.write_blob(&content)?;
                debug!(path = %file, %oid, "staged file");
                staging.add(file, oid);
            }
        }
        self.index.save(&staging)?;
        Ok(staging)
    }

    /// Record the staging area as a new commit on the current branch.
    pub fn commit(&self, staging: &StagingArea, message: &str) -> Result<ObjectId, RepoError> {
        let branch = self.refs.current_branch()?;
        let parent = self.refs.head_commit()?;
        let identity = self.identity();

        let commit = Commit {
            tree: self.odb.encode_tree(staging.files())?,
            parents: parent.into_iter().collect(),
            author: identity.clone(),
            committer: identity,
            timestamp: Utc::now().timestamp(),
            message: message.into(),
        };
        let oid = self.odb.encode_commit(&commit)?;
        self.refs.advance(&branch, &oid)?;
        info!(%branch, commit = %oid, "committed");
        Ok(oid)
    }

    /// Create `name` at the current commit.
    pub fn create_branch(&self, name: &str) -> Result<ObjectId, RepoError> {
        if self.refs.branch_exists(name)? {
            return Err(RepoError::BranchExists(name.to_string()));
        }
        let head = self.refs.head_commit()?.ok_or(RepoError::UnbornBranch)?;
        self.refs.set_branch(name, &head)?;
        Ok(head)
    }

    /// Switch to `branch`: its snapshot replaces the working tree and the
    /// staging area, and HEAD names it.
    pub fn checkout(&self, branch: &str) -> Result<StagingArea, RepoError> {
        let tip = self
            .refs
            .branch_tip(branch)?
            .ok_or_else(|| RepoError::BranchNotFound(branch.to_string()))?;
        let files = self.files_at(&tip)?;

        checkout_files(&self.worktree, &self.odb, &files)?;
        let staging = StagingArea::from(files);
        self.index.save(&staging)?;
        self.refs.set_head(branch)?;
        info!(%branch, commit = %tip, "switched branch");
        Ok(staging)
    }
}
