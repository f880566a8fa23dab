//! Read-only client for the repository hosting API.
//!
//! Two endpoints are used:
//! - `GET {base}/repos/show/{owner}/{name}/branches` → `{"branches": {name: revision}}`
//! - `GET {base}/tree/show/{owner}/{name}/{revision}` → `{"tree": [node, ...]}`

use std::collections::HashMap;

use {
    async_trait::async_trait,
    reqwest::Client,
    serde::{Deserialize, de::DeserializeOwned},
    tracing::debug,
    url::{Url, form_urlencoded},
};

use crate::{error::BrowseError, identifier::RepositoryIdentifier, tree::TreeNode};

/// Remote lookups needed to walk a repository tree.
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    /// Branch name → head revision.
    async fn branches(
        &self,
        repo: &RepositoryIdentifier,
    ) -> Result<HashMap<String, String>, BrowseError>;

    /// Children of the tree object identified by `revision`.
    async fn tree(
        &self,
        repo: &RepositoryIdentifier,
        revision: &str,
    ) -> Result<Vec<TreeNode>, BrowseError>;
}

/// Encode query arguments, skipping the ones without a value.
pub fn encode_query(args: &[(&str, Option<&str>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in args {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

/// `{base}/{kind}/{uri_end}?{query}`; the `?` is left out when no argument has a value.
pub fn build_url(
    base: &str,
    kind: &str,
    uri_end: &str,
    args: &[(&str, Option<&str>)],
) -> Result<Url, BrowseError> {
    let mut raw = format!("{}/{kind}/{uri_end}", base.trim_end_matches('/'));
    let query = encode_query(args);
    if !query.is_empty() {
        raw.push('?');
        raw.push_str(&query);
    }
    Url::parse(&raw).map_err(|source| BrowseError::InvalidUrl { url: raw, source })
}

#[derive(Deserialize)]
struct BranchesResponse {
    branches: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeNode>,
}

/// GitHub v2 JSON API client.
#[derive(Debug, Clone)]
pub struct GithubApi {
    client: Client,
    base_url: String,
}

impl GithubApi {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, BrowseError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| BrowseError::remote(base_url, e))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use an existing HTTP client (shares its connection pool).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn query<T: DeserializeOwned>(
        &self,
        kind: &str,
        uri_end: &str,
        args: &[(&str, Option<&str>)],
    ) -> Result<T, BrowseError> {
        let url = build_url(&self.base_url, kind, uri_end, args)?;
        debug!(url = %url, "querying repository API");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BrowseError::remote(url.as_str(), e))?;

        response
            .json::<T>()
            .await
            .map_err(|e| BrowseError::remote(url.as_str(), e))
    }
}

#[async_trait]
impl RepositoryApi for GithubApi {
    async fn branches(
        &self,
        repo: &RepositoryIdentifier,
    ) -> Result<HashMap<String, String>, BrowseError> {
        let uri_end = format!("show/{}/{}/branches", repo.owner(), repo.name());
        let resp: BranchesResponse = self.query("repos", &uri_end, &[]).await?;
        Ok(resp.branches)
    }

    async fn tree(
        &self,
        repo: &RepositoryIdentifier,
        revision: &str,
    ) -> Result<Vec<TreeNode>, BrowseError> {
        let uri_end = format!("show/{}/{}/{revision}", repo.owner(), repo.name());
        let resp: TreeResponse = self.query("tree", &uri_end, &[]).await?;
        Ok(resp.tree)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::tree::NodeKind};

    #[test]
    fn query_omits_unset_arguments() {
        let query = encode_query(&[("x", Some("1")), ("y", None)]);
        assert!(query.contains("x=1"));
        assert!(!query.contains('y'));
    }

    #[test]
    fn query_escapes_values() {
        assert_eq!(encode_query(&[("q", Some("a b&c"))]), "q=a+b%26c");
    }

    #[test]
    fn url_without_arguments_has_no_question_mark() {
        let url = build_url("http://api.test/v2/", "tree", "show/o/n/abc", &[("y", None)]).unwrap();
        assert_eq!(url.as_str(), "http://api.test/v2/tree/show/o/n/abc");
        assert!(url.query().is_none());
    }

    #[test]
    fn url_with_arguments() {
        let url = build_url("http://api.test", "repos", "show/o/n/branches", &[
            ("x", Some("1")),
            ("y", None),
        ])
        .unwrap();
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn invalid_base_is_reported() {
        let err = build_url("not a url", "tree", "show/o/n/abc", &[]).unwrap_err();
        assert!(matches!(err, BrowseError::InvalidUrl { .. }));
    }

    fn repo() -> RepositoryIdentifier {
        RepositoryIdentifier::new("o", "n", "/")
    }

    #[tokio::test]
    async fn fetches_branches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/show/o/n/branches")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"branches": {"master": "abc", "dev": "def"}}"#)
            .create_async()
            .await;

        let api = GithubApi::new(&server.url(), "test-agent").unwrap();
        let branches = api.branches(&repo()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(branches.get("master").map(String::as_str), Some("abc"));
        assert_eq!(branches.len(), 2);
    }

    #[tokio::test]
    async fn fetches_tree_children_in_order() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tree/show/o/n/abc")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tree": [
                    {"name": "p", "type": "tree", "sha": "h1"},
                    {"name": "f", "type": "blob", "sha": "h2"}
                ]}"#,
            )
            .create_async()
            .await;

        let api = GithubApi::new(&server.url(), "test-agent").unwrap();
        let nodes = api.tree(&repo(), "abc").await.unwrap();

        mock.assert_async().await;
        assert_eq!(nodes, [
            TreeNode::new("p", NodeKind::Tree, "h1"),
            TreeNode::new("f", NodeKind::Blob, "h2"),
        ]);
    }

    #[tokio::test]
    async fn sends_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tree/show/o/n/abc")
            .match_header("user-agent", "plugin-downloader-test")
            .with_status(200)
            .with_body(r#"{"tree": []}"#)
            .create_async()
            .await;

        let api = GithubApi::new(&server.url(), "plugin-downloader-test").unwrap();
        assert!(api.tree(&repo(), "abc").await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_remote_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/show/o/n/branches")
            .with_status(500)
            .create_async()
            .await;

        let api = GithubApi::new(&server.url(), "test-agent").unwrap();
        let err = api.branches(&repo()).await.unwrap_err();
        assert!(matches!(err, BrowseError::RemoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn undecodable_body_is_remote_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/tree/show/o/n/abc")
            .with_status(200)
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let api = GithubApi::new(&server.url(), "test-agent").unwrap();
        let err = api.tree(&repo(), "abc").await.unwrap_err();
        match err {
            BrowseError::RemoteUnavailable { url, .. } => {
                assert!(url.ends_with("/tree/show/o/n/abc"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_remote_unavailable() {
        // Nothing listens on the discard port.
        let api = GithubApi::new("http://127.0.0.1:9", "test-agent").unwrap();
        let err = api.branches(&repo()).await.unwrap_err();
        assert!(matches!(err, BrowseError::RemoteUnavailable { .. }));
    }
}
