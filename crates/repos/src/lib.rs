//! Repository browsing: list the plugin directories of remote repositories.
//!
//! A [`RepositoryBrowser`] walks a repository's tree through a read-only JSON
//! API ([`RepositoryApi`]), one remote lookup per path segment, and reports the
//! directories found at the end of the walk. The [`RepositoryRegistry`] maps
//! short names from the config file to browsable repositories.

pub mod api;
pub mod browser;
pub mod error;
pub mod identifier;
pub mod registry;
pub mod tree;

pub use {
    api::{GithubApi, RepositoryApi},
    browser::{DEFAULT_BRANCH, RepositoryBrowser},
    error::BrowseError,
    identifier::RepositoryIdentifier,
    registry::{RepositoryEntry, RepositoryRegistry},
    tree::{NodeKind, TreeNode},
};
