use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failures while talking to the remote repository API.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// Transport failure, non-success status, or undecodable body.
    #[error("remote API unavailable ({url}): {source}")]
    RemoteUnavailable {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The branch metadata has no entry for the default branch.
    #[error("branch '{branch}' not found in {owner}/{name}")]
    BranchNotFound {
        owner: String,
        name: String,
        branch: String,
    },

    #[error("invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl BrowseError {
    pub fn remote(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::RemoteUnavailable {
            url: url.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_keeps_source() {
        let err = BrowseError::remote("http://api/x", "connection refused");
        assert_eq!(
            err.to_string(),
            "remote API unavailable (http://api/x): connection refused"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn branch_not_found_message() {
        let err = BrowseError::BranchNotFound {
            owner: "o".into(),
            name: "n".into(),
            branch: "master".into(),
        };
        assert_eq!(err.to_string(), "branch 'master' not found in o/n");
    }
}
