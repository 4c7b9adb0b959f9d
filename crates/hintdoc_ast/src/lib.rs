//! hintdoc_ast: Syntax tree definitions for annotated JavaScript.
//!
//! Defines the node sum types, `SyntaxKind`, the closed set of annotation
//! labels, the comment side table, and a visitor over the tree.

pub mod comments;
pub mod generated;
pub mod node;
pub mod syntax_kind;
pub mod type_label;
pub mod types;
pub mod visitor;

pub use comments::{AttachedComments, CommentKind, CommentMap, CommentOrigin, CommentRecord};
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use type_label::TypeLabel;
pub use types::*;
