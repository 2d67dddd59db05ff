//! Working-tree mutation operations for an interactive Git front end.
//!
//! The front end hands this crate classified file records and directory
//! nodes; the crate decides which git commands revert, stage, or remove
//! them and issues those commands through an injected [`Runner`]. Status
//! loading, branch resets, and submodule resets are collaborator contracts
//! the front end can satisfy with its own managers.

pub mod branches;
pub mod cmd;
pub mod config;
pub mod error;
pub mod file;
pub mod file_tree;
pub mod os;
pub mod status;
pub mod submodules;
pub mod worktree;

pub use cmd::{CmdObj, ProcessRunner, Runner};
pub use error::Error;
pub use file::{File, ShortStatus};
pub use file_tree::FileNode;
pub use worktree::WorktreeMgr;
