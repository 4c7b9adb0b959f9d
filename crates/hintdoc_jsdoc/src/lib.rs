//! hintdoc_jsdoc: Documentation comments from type annotations.
//!
//! Maps annotation labels to JSDoc type expressions, assembles `@type`,
//! `@param` and `@return` tags into block comments, and walks a parsed file
//! recording one synthesized comment per documented declaration in a
//! [`CommentMap`](hintdoc_ast::CommentMap).

mod doc_block;
mod mapping;
mod synthesizer;

pub use doc_block::{DocBlock, DocTag};
pub use mapping::{jsdoc_type_name, UnsupportedLabel};
pub use synthesizer::{synthesize_docs, DocSynthesizer};
