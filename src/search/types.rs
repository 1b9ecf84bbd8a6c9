use serde::{Deserialize, Serialize};

/// Identifies one discoverable repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub owner: String,
    pub clone_url: String,
}

impl RepositoryDescriptor {
    #[must_use]
    pub fn new(name: &str, owner: &str, clone_url: &str) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            clone_url: clone_url.to_string(),
        }
    }

    /// `owner/name`, used in log lines.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// One page of a repository search response.
///
/// Only the fields the audit consumes are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub name: String,
    pub owner: SearchOwner,
    pub clone_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchOwner {
    pub login: String,
}

impl From<SearchItem> for RepositoryDescriptor {
    fn from(item: SearchItem) -> Self {
        Self {
            name: item.name,
            owner: item.owner.login,
            clone_url: item.clone_url,
        }
    }
}
