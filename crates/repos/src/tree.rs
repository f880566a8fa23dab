use serde::{Deserialize, Serialize};

/// Kind of an entry in a repository tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory.
    Tree,
    /// File.
    Blob,
    /// Anything else the API reports (e.g. `commit` for submodules).
    #[serde(other)]
    Other,
}

/// One child entry of a tree object, as returned by the tree endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Hash of the entry; for directories, the revision of their own tree.
    #[serde(rename = "sha")]
    pub reference: String,
}

impl TreeNode {
    pub fn new(name: &str, kind: NodeKind, reference: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            reference: reference.into(),
        }
    }

    pub fn is_tree(&self) -> bool {
        self.kind == NodeKind::Tree
    }
}
