//! Best-effort recursive changes of the owning user and group of filesystem trees.
//!
//! The core of the crate is [tree::TreeOwnerChanger], which walks a tree depth-first (post-order
//! for directories) and attempts to set a fixed [ownership::Ownership] on every entry, silently
//! skipping the ones that can't be changed. Name resolution and a command-line surface are
//! available behind the "identity" and "cli" features.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod ownership;

pub mod report;

pub mod syscall;

pub mod tree;

#[cfg(feature = "identity")]
#[cfg_attr(docsrs, doc(cfg(feature = "identity")))]
pub mod identity;

#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod cli;
