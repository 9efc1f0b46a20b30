// Kbdlayer Transform Tables
// Dead-key composition tables: each entry is a final string or a deeper table

use std::sync::Arc;

use indexmap::IndexMap;

/// Key of the entry used when a continuation has no match
pub const FALLBACK_ENTRY: &str = " ";

/// Value of a transform table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformNode {
    /// Composition is complete, commit this string
    Terminal(String),
    /// Another key is required
    Continuation(Arc<TransformTable>),
}

impl TransformNode {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransformNode::Terminal(_))
    }
}

/// Maps the value of the following key to the next node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformTable {
    entries: IndexMap<String, TransformNode>,
}

impl TransformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, input: impl Into<String>, node: TransformNode) {
        self.entries.insert(input.into(), node);
    }

    pub fn get(&self, input: &str) -> Option<&TransformNode> {
        self.entries.get(input)
    }

    /// The string committed when the sequence is abandoned, usually the
    /// accent glyph on its own. Only terminal entries qualify.
    pub fn fallback(&self) -> Option<&str> {
        match self.entries.get(FALLBACK_ENTRY) {
            Some(TransformNode::Terminal(value)) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys needed to reach the deepest terminal
    pub fn depth(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                TransformNode::Terminal(_) => 1,
                TransformNode::Continuation(table) => 1 + table.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

impl FromIterator<(String, TransformNode)> for TransformTable {
    fn from_iter<I: IntoIterator<Item = (String, TransformNode)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
