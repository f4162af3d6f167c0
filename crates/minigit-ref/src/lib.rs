//! Branch references for minigit.
//!
//! A repository has a set of branches, each naming one commit, and a `HEAD`
//! that names the current branch. The [`RefStore`] trait is the seam the
//! rest of minigit talks to; [`FilesRefStore`] keeps refs as files under
//! `.minigit/` and [`MemoryRefStore`] keeps them in memory.

mod error;
pub mod files;
mod memory;
mod name;
mod store;

pub use error::RefError;
pub use files::FilesRefStore;
pub use memory::MemoryRefStore;
pub use name::BranchName;
pub use store::RefStore;
