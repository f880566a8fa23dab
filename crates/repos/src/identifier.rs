use std::fmt;

/// A repository on the hosting service plus the directory to browse in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentifier {
    owner: String,
    name: String,
    subpath: Vec<String>,
}

impl RepositoryIdentifier {
    /// `path` is slash-separated; empty segments (leading, trailing or
    /// doubled slashes) are dropped, so `"/"` means the repository root.
    pub fn new(owner: &str, name: &str, path: &str) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            subpath: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subpath(&self) -> &[String] {
        &self.subpath
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
