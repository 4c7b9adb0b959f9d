//! The closed set of annotation labels.

use crate::syntax_kind::SyntaxKind;
use std::fmt;

/// A primitive type name that may follow an annotation colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeLabel {
    Number,
    Boolean,
    String,
    Any,
    Void,
    Object,
    Undefined,
    Null,
}

impl TypeLabel {
    pub const ALL: [TypeLabel; 8] = [
        TypeLabel::Number,
        TypeLabel::Boolean,
        TypeLabel::String,
        TypeLabel::Any,
        TypeLabel::Void,
        TypeLabel::Object,
        TypeLabel::Undefined,
        TypeLabel::Null,
    ];

    /// The spelling used in source annotations.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeLabel::Number => "number",
            TypeLabel::Boolean => "boolean",
            TypeLabel::String => "string",
            TypeLabel::Any => "any",
            TypeLabel::Void => "void",
            TypeLabel::Object => "object",
            TypeLabel::Undefined => "undefined",
            TypeLabel::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> Option<TypeLabel> {
        TypeLabel::ALL.into_iter().find(|label| label.as_str() == name)
    }

    /// The token kind a word spelled like this label is classified as.
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            TypeLabel::Number => SyntaxKind::NumberKeyword,
            TypeLabel::Boolean => SyntaxKind::BooleanKeyword,
            TypeLabel::String => SyntaxKind::StringKeyword,
            TypeLabel::Any => SyntaxKind::AnyKeyword,
            TypeLabel::Void => SyntaxKind::VoidKeyword,
            TypeLabel::Object => SyntaxKind::ObjectKeyword,
            TypeLabel::Undefined => SyntaxKind::UndefinedKeyword,
            TypeLabel::Null => SyntaxKind::NullKeyword,
        }
    }

    pub fn from_syntax_kind(kind: SyntaxKind) -> Option<TypeLabel> {
        TypeLabel::ALL.into_iter().find(|label| label.syntax_kind() == kind)
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
