//! Arena-backed element tree.

use crate::host::{DocumentTree, NodeId};

/// Tags treated as block containers by the format-block simulation.
const BLOCK_TAGS: &[&str] = &["P", "BLOCKQUOTE", "DIV", "H1", "H2", "H3", "PRE", "LI"];

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    markers: Vec<String>,
    href: Option<String>,
}

/// A document tree the toolbar can inspect and the command simulation can
/// mutate. Nodes are never freed; removal just detaches them.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<NodeData>,
}

impl DomTree {
    /// Create a tree containing only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "#document".to_string(),
                parent: None,
                children: Vec::new(),
                markers: Vec::new(),
                href: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element child with the given (upper-case) tag.
    pub fn add_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push_node(parent, tag.to_string())
    }

    /// Append a text node child.
    pub fn add_text(&mut self, parent: NodeId) -> NodeId {
        self.push_node(parent, "#text".to_string())
    }

    pub fn add_marker(&mut self, node: NodeId, marker: &str) {
        self.node_mut(node).markers.push(marker.to_string());
    }

    pub fn set_link_target(&mut self, node: NodeId, href: &str) {
        self.node_mut(node).href = Some(href.to_string());
    }

    /// Insert a new element between `node` and its parent, adopting `node`
    /// as the wrapper's only child. Returns `None` for the root.
    pub fn wrap(&mut self, node: NodeId, tag: &str) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let wrapper = NodeId(self.nodes.len() as u64);
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            parent: Some(parent),
            children: vec![node],
            markers: Vec::new(),
            href: None,
        });
        let slot = self
            .node(parent)
            .children
            .iter()
            .position(|&child| child == node)
            .expect("child not registered with its parent");
        self.node_mut(parent).children[slot] = wrapper;
        self.node_mut(node).parent = Some(wrapper);
        Some(wrapper)
    }

    /// Remove the nearest ancestor of `node` carrying `tag`, splicing its
    /// children into its parent. Returns false when no such ancestor exists.
    pub fn unwrap_ancestor(&mut self, node: NodeId, tag: &str) -> bool {
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            if self.node(parent).tag == tag {
                self.splice_out(parent);
                return true;
            }
            current = parent;
        }
        false
    }

    /// Retag the nearest unmarked block ancestor of `node`. Marked nodes
    /// (the editable region, toolbar elements) are structural and stay put.
    pub fn retag_nearest_block(&mut self, node: NodeId, tag: &str) -> bool {
        let upper = tag.to_uppercase();
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            let data = self.node(parent);
            if BLOCK_TAGS.contains(&data.tag.as_str()) && data.markers.is_empty() {
                self.node_mut(parent).tag = upper;
                return true;
            }
            current = parent;
        }
        false
    }

    fn push_node(&mut self, parent: NodeId, tag: String) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(NodeData {
            tag,
            parent: Some(parent),
            children: Vec::new(),
            markers: Vec::new(),
            href: None,
        });
        self.node_mut(parent).children.push(id);
        id
    }

    fn splice_out(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).parent else {
            return;
        };
        let children = std::mem::take(&mut self.node_mut(node).children);
        for &child in &children {
            self.node_mut(child).parent = Some(parent);
        }
        let slot = self
            .node(parent)
            .children
            .iter()
            .position(|&child| child == node)
            .expect("child not registered with its parent");
        self.node_mut(parent)
            .children
            .splice(slot..=slot, children);
        self.node_mut(node).parent = None;
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[usize::try_from(id.0).expect("node id out of range")]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[usize::try_from(id.0).expect("node id out of range")]
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentTree for DomTree {
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn tag_of(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    fn link_target_of(&self, node: NodeId) -> Option<&str> {
        self.node(node).href.as_deref()
    }

    fn has_marker(&self, node: NodeId, marker: &str) -> bool {
        self.node(node).markers.iter().any(|m| m == marker)
    }
}
