//! hintdoc_core: Core utilities shared by every stage of the hintdoc transpiler.
//!
//! Provides character-offset text spans and line maps.

pub mod text;

pub use text::{byte_offset, LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
