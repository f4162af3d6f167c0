//! Content digests and object identity for minigit.
//!
//! Every stored object (blob, tree, commit) is named by the SHA-1 digest of
//! its exact bytes. This crate provides the `ObjectId` type, the streaming
//! `Hasher`, and hex rendering of identities.

mod error;
pub mod hasher;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
