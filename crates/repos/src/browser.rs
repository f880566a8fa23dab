use std::sync::Arc;

use tracing::{debug, error};

use crate::{
    api::RepositoryApi, error::BrowseError, identifier::RepositoryIdentifier, tree::TreeNode,
};

/// Branch whose head is browsed.
pub const DEFAULT_BRANCH: &str = "master";

/// Walks repository trees through a [`RepositoryApi`].
///
/// Every call goes to the remote API: nothing is cached, nothing is retried.
/// Listing the plugins of a repository costs `2 + depth(subpath)` round trips.
#[derive(Clone)]
pub struct RepositoryBrowser {
    api: Arc<dyn RepositoryApi>,
}

impl RepositoryBrowser {
    pub fn new(api: Arc<dyn RepositoryApi>) -> Self {
        Self { api }
    }

    /// Head revision of the default branch.
    pub async fn resolve_default_branch_revision(
        &self,
        repo: &RepositoryIdentifier,
    ) -> Result<String, BrowseError> {
        let mut branches = self.api.branches(repo).await?;
        branches
            .remove(DEFAULT_BRANCH)
            .ok_or_else(|| BrowseError::BranchNotFound {
                owner: repo.owner().into(),
                name: repo.name().into(),
                branch: DEFAULT_BRANCH.into(),
            })
    }

    pub async fn fetch_tree_children(
        &self,
        repo: &RepositoryIdentifier,
        revision: &str,
    ) -> Result<Vec<TreeNode>, BrowseError> {
        self.api.tree(repo, revision).await
    }

    /// Follow `subpath` from `start_revision`, one tree lookup per segment.
    ///
    /// Returns the revision of the tree at the end of the path, or `None` when
    /// a segment has no matching child or matches something other than a
    /// directory. Names match exactly; the first matching child wins.
    pub async fn resolve_path(
        &self,
        repo: &RepositoryIdentifier,
        start_revision: &str,
        subpath: &[String],
    ) -> Result<Option<String>, BrowseError> {
        let mut revision = start_revision.to_string();

        for segment in subpath {
            let children = self.fetch_tree_children(repo, &revision).await?;
            let Some(node) = children.into_iter().find(|n| n.name == *segment) else {
                debug!(repo = %repo, segment = %segment, "path segment not found");
                return Ok(None);
            };
            if !node.is_tree() {
                debug!(repo = %repo, segment = %segment, "path segment is not a directory");
                return Ok(None);
            }
            revision = node.reference;
        }

        Ok(Some(revision))
    }

    /// Names of the directories at the repository's configured subpath, in
    /// the order the API returned them.
    ///
    /// Never fails: an unresolvable path or a remote error is logged and
    /// yields an empty list, so a broken repository entry cannot take the
    /// command down with it.
    pub async fn list_plugins(&self, repo: &RepositoryIdentifier) -> Vec<String> {
        match self.try_list_plugins(repo).await {
            Ok(Some(plugins)) => plugins,
            Ok(None) => {
                error!(
                    owner = repo.owner(),
                    name = repo.name(),
                    path = %repo.subpath().join("/"),
                    "cannot get plugins list: path not found in repository"
                );
                Vec::new()
            },
            Err(e) => {
                error!(
                    owner = repo.owner(),
                    name = repo.name(),
                    error = %e,
                    "cannot get plugins list from repository"
                );
                Vec::new()
            },
        }
    }

    async fn try_list_plugins(
        &self,
        repo: &RepositoryIdentifier,
    ) -> Result<Option<Vec<String>>, BrowseError> {
        let head = self.resolve_default_branch_revision(repo).await?;
        let Some(revision) = self.resolve_path(repo, &head, repo.subpath()).await? else {
            return Ok(None);
        };

        let plugins = self
            .fetch_tree_children(repo, &revision)
            .await?
            .into_iter()
            .filter(TreeNode::is_tree)
            .map(|n| n.name)
            .collect();
        Ok(Some(plugins))
    }
}
