use crate::types::TagId;
use serde::{Deserialize, Serialize};

/// Separator placed between ancestor names in a tag's full name
pub const FULL_NAME_SEPARATOR: &str = " > ";

/// A tag and its subtree as delivered by the taxonomy collaborator
///
/// `full_name` may be left empty; [`super::TagTaxonomy::from_roots`] fills it
/// from the parent chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagNode {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub parent_id: Option<TagId>,
    #[serde(default)]
    pub children: Vec<TagNode>,
}

impl TagNode {
    /// Create a root node without children
    #[must_use]
    pub fn new(id: impl Into<TagId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            full_name: String::new(),
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Append a child, linking it to this node
    #[must_use]
    pub fn with_child(mut self, mut child: TagNode) -> Self {
        child.parent_id = Some(self.id);
        self.children.push(child);
        self
    }

    /// Pre-order traversal of this node and its descendants
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a tag subtree or forest
pub struct Walk<'a> {
    pub(super) stack: Vec<&'a TagNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a TagNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Flat tag row, as stored by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<TagId>,
}

impl TagRecord {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, parent_id: Option<u64>) -> Self {
        Self {
            id: TagId(id),
            name: name.into(),
            parent_id: parent_id.map(TagId),
        }
    }
}

/// Indexed view of a single tag, without its subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    pub id: TagId,
    pub name: String,
    pub full_name: String,
    pub parent_id: Option<TagId>,
    /// Distance from the root (roots are depth 0)
    pub depth: usize,
    /// Child ids in display order
    pub children: Vec<TagId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_child_links_parent() {
        let node = TagNode::new(1, "Series").with_child(TagNode::new(2, "Frieren"));
        assert_eq!(node.children[0].parent_id, Some(TagId(1)));
    }

    #[test]
    fn test_walk_is_pre_order() {
        let node = TagNode::new(1, "a")
            .with_child(TagNode::new(2, "b").with_child(TagNode::new(3, "c")))
            .with_child(TagNode::new(4, "d"));

        let ids: Vec<u64> = node.walk().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
