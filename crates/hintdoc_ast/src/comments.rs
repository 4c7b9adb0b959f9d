//! Comment records and the side table that attaches them to nodes.
//!
//! Comments never live in the tree. The scanner collects original comments
//! with their ranges, attachment assigns each one to a node identity, and the
//! documentation walker adds synthesized blocks to the same table. Rendering
//! reads, for each node: original leading comments, then synthesized
//! comments, then the node, then trailing comments.

use crate::types::NodeId;
use hintdoc_core::text::TextRange;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentOrigin {
    /// Collected verbatim from the source.
    Original,
    /// Produced from a type annotation.
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub kind: CommentKind,
    /// The text between the delimiters: after `//`, or between `/*` and `*/`.
    pub text: String,
    /// Source range including delimiters. `None` for synthesized comments.
    pub range: Option<TextRange>,
    pub origin: CommentOrigin,
}

impl CommentRecord {
    pub fn original(kind: CommentKind, text: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range: Some(range),
            origin: CommentOrigin::Original,
        }
    }

    /// A synthesized comment. Always block-kind.
    pub fn synthesized(text: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::Block,
            text: text.into(),
            range: None,
            origin: CommentOrigin::Synthesized,
        }
    }

    pub fn is_original(&self) -> bool {
        self.origin == CommentOrigin::Original
    }

    /// `/** ... */` style.
    pub fn is_doc_block(&self) -> bool {
        self.kind == CommentKind::Block && self.text.starts_with('*')
    }

    /// The comment as it appears in source, delimiters included.
    pub fn source_text(&self) -> String {
        match self.kind {
            CommentKind::Line => format!("//{}", self.text),
            CommentKind::Block => format!("/*{}*/", self.text),
        }
    }

    pub fn pos(&self) -> u32 {
        self.range.map(|r| r.pos).unwrap_or(0)
    }

    pub fn end(&self) -> u32 {
        self.range.map(|r| r.end).unwrap_or(0)
    }
}

/// Everything attached to one node.
#[derive(Debug, Clone, Default)]
pub struct AttachedComments {
    pub leading: Vec<CommentRecord>,
    pub synthesized: Vec<CommentRecord>,
    pub trailing: Vec<CommentRecord>,
    /// Comments inside an otherwise empty region of a statement list owned by
    /// this node, e.g. `{ /* nothing */ }`.
    pub dangling: Vec<CommentRecord>,
}

impl AttachedComments {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty()
            && self.synthesized.is_empty()
            && self.trailing.is_empty()
            && self.dangling.is_empty()
    }
}

/// Comments keyed by node identity.
#[derive(Debug, Clone, Default)]
pub struct CommentMap {
    entries: FxHashMap<NodeId, AttachedComments>,
}

impl CommentMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: NodeId) -> &mut AttachedComments {
        self.entries.entry(id).or_default()
    }

    pub fn add_leading(&mut self, id: NodeId, comment: CommentRecord) {
        self.entry(id).leading.push(comment);
    }

    pub fn add_synthesized(&mut self, id: NodeId, comment: CommentRecord) {
        self.entry(id).synthesized.push(comment);
    }

    pub fn add_trailing(&mut self, id: NodeId, comment: CommentRecord) {
        self.entry(id).trailing.push(comment);
    }

    pub fn add_dangling(&mut self, id: NodeId, comment: CommentRecord) {
        self.entry(id).dangling.push(comment);
    }

    pub fn get(&self, id: NodeId) -> Option<&AttachedComments> {
        self.entries.get(&id)
    }

    pub fn leading(&self, id: NodeId) -> &[CommentRecord] {
        self.get(id).map(|c| c.leading.as_slice()).unwrap_or(&[])
    }

    pub fn synthesized(&self, id: NodeId) -> &[CommentRecord] {
        self.get(id).map(|c| c.synthesized.as_slice()).unwrap_or(&[])
    }

    pub fn trailing(&self, id: NodeId) -> &[CommentRecord] {
        self.get(id).map(|c| c.trailing.as_slice()).unwrap_or(&[])
    }

    pub fn dangling(&self, id: NodeId) -> &[CommentRecord] {
        self.get(id).map(|c| c.dangling.as_slice()).unwrap_or(&[])
    }

    /// Whether anything renders before the node.
    pub fn has_leading(&self, id: NodeId) -> bool {
        !self.leading(id).is_empty() || !self.synthesized(id).is_empty()
    }

    pub fn synthesized_count(&self) -> usize {
        self.entries.values().map(|c| c.synthesized.len()).sum()
    }

    pub fn original_count(&self) -> usize {
        self.entries
            .values()
            .map(|c| c.leading.len() + c.trailing.len() + c.dangling.len())
            .sum()
    }

    /// Drop every original comment, keeping synthesized ones.
    pub fn retain_synthesized_only(&mut self) {
        for attached in self.entries.values_mut() {
            attached.leading.clear();
            attached.trailing.clear();
            attached.dangling.clear();
        }
        self.entries.retain(|_, attached| !attached.is_empty());
    }
}
