//! Annotation label to JSDoc type name.

use hintdoc_ast::TypeLabel;
use thiserror::Error;

/// A label the documentation dialect cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target documentation dialect has no representation for {label}")]
pub struct UnsupportedLabel {
    pub label: TypeLabel,
}

/// The type expression written between the braces of a tag.
pub fn jsdoc_type_name(label: TypeLabel) -> Result<&'static str, UnsupportedLabel> {
    match label {
        TypeLabel::Any => Ok("*"),
        TypeLabel::Object => Ok("Object"),
        TypeLabel::Number => Ok("number"),
        TypeLabel::Boolean => Ok("boolean"),
        TypeLabel::String => Ok("string"),
        TypeLabel::Undefined => Ok("undefined"),
        TypeLabel::Null => Ok("null"),
        TypeLabel::Void => Err(UnsupportedLabel { label }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renamed_labels() {
        assert_eq!(jsdoc_type_name(TypeLabel::Any), Ok("*"));
        assert_eq!(jsdoc_type_name(TypeLabel::Object), Ok("Object"));
    }

    #[test]
    fn test_identity_labels() {
        for label in [
            TypeLabel::Number,
            TypeLabel::Boolean,
            TypeLabel::String,
            TypeLabel::Undefined,
            TypeLabel::Null,
        ] {
            assert_eq!(jsdoc_type_name(label), Ok(label.as_str()));
        }
    }

    #[test]
    fn test_void_is_unsupported() {
        let err = jsdoc_type_name(TypeLabel::Void).unwrap_err();
        assert_eq!(err.label, TypeLabel::Void);
        assert_eq!(
            err.to_string(),
            "target documentation dialect has no representation for void"
        );
    }
}
