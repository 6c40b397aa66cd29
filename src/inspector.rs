//! Ancestor-chain inspection for the active selection.
//!
//! The inspector is the only part of the core that reads tree shape: given
//! the selection's anchor node it walks parent links to the document root
//! and records which tags surround the selection. Button active states and
//! the quote/link dispatch decisions are all derived from this set.

use std::collections::HashSet;

use crate::host::{DocumentTree, NodeId};

/// Tags found on the ancestor chain of one node at one instant.
///
/// Built fresh on every inspection and discarded after use; never merged
/// across selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorTags {
    tags: HashSet<String>,
    url: Option<String>,
}

impl AncestorTags {
    /// Whether the given tag name was found on the chain.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Target of the nearest link ancestor, when one exists.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// True when no ancestor was recorded.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of distinct tags recorded.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Record a tag as present.
    pub fn insert(&mut self, tag: impl Into<String>) {
        self.tags.insert(tag.into());
    }

    /// Record a link target. The first recorded target wins, so walking
    /// bottom-up keeps the nearest link ancestor.
    pub fn set_url(&mut self, url: impl Into<String>) {
        if self.url.is_none() {
            self.url = Some(url.into());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for AncestorTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().map(Into::into).collect(),
            url: None,
        }
    }
}

/// Walk from `anchor` up through parent links, recording every ancestor's
/// tag name and the nearest link ancestor's target.
///
/// Pure function of the tree shape at call time. A node with no parent
/// yields an empty set.
pub fn inspect(tree: &impl DocumentTree, anchor: NodeId) -> AncestorTags {
    let mut tags = AncestorTags::default();
    let mut node = anchor;
    while let Some(parent) = tree.parent_of(node) {
        tags.insert(tree.tag_of(parent));
        if let Some(href) = tree.link_target_of(parent) {
            tags.set_url(href);
        }
        node = parent;
    }
    tags
}
