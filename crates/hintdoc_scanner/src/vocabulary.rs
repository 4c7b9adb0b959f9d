//! Word classification and the registry of reserved type words.
//!
//! The scanner never hardcodes which words are annotation labels. It asks a
//! [`WordClassifier`] for every identifier-shaped word; the annotation grammar
//! answers from a [`TypeVocabulary`] built once at startup and shared
//! read-only behind an `Arc`.

use hintdoc_ast::syntax_kind::SyntaxKind;
use hintdoc_ast::type_label::TypeLabel;
use rustc_hash::FxHashMap;

/// Decides whether an identifier-shaped word is a reserved word.
pub trait WordClassifier: Send + Sync {
    /// The keyword kind for `word`, or `None` for a plain identifier.
    fn classify_word(&self, word: &str) -> Option<SyntaxKind>;
}

/// Plain JavaScript keywords only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseKeywords;

impl WordClassifier for BaseKeywords {
    fn classify_word(&self, word: &str) -> Option<SyntaxKind> {
        SyntaxKind::from_keyword(word)
    }
}

/// The set of type names that may follow an annotation colon.
///
/// Built by repeated [`reserve`](TypeVocabulary::reserve) calls and then
/// frozen by wrapping it in an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TypeVocabulary {
    reserved: FxHashMap<String, TypeLabel>,
}

impl TypeVocabulary {
    /// An empty vocabulary. Every colon-annotation fails against it.
    pub fn new() -> Self {
        Self::default()
    }

    /// All eight labels reserved.
    pub fn standard() -> Self {
        let mut vocabulary = Self::new();
        for label in TypeLabel::ALL {
            vocabulary.reserve(label.as_str());
        }
        vocabulary
    }

    /// Reserve `name` and return the token kind it now classifies as.
    ///
    /// Reserving the same name twice returns the same kind. Names outside the
    /// closed label set are rejected with `None`.
    pub fn reserve(&mut self, name: &str) -> Option<SyntaxKind> {
        let label = TypeLabel::from_name(name)?;
        self.reserved.entry(name.to_string()).or_insert(label);
        Some(label.syntax_kind())
    }

    /// The kind a reserved name classifies as.
    pub fn lookup(&self, word: &str) -> Option<SyntaxKind> {
        self.reserved.get(word).map(|label| label.syntax_kind())
    }

    /// The label for a token kind, if that label is reserved here.
    pub fn label_of(&self, kind: SyntaxKind) -> Option<TypeLabel> {
        let label = TypeLabel::from_syntax_kind(kind)?;
        self.reserved.contains_key(label.as_str()).then_some(label)
    }

    pub fn contains(&self, kind: SyntaxKind) -> bool {
        self.label_of(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    /// Reserved labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = TypeLabel> + '_ {
        TypeLabel::ALL
            .into_iter()
            .filter(|label| self.reserved.contains_key(label.as_str()))
    }
}

impl WordClassifier for TypeVocabulary {
    fn classify_word(&self, word: &str) -> Option<SyntaxKind> {
        SyntaxKind::from_keyword(word).or_else(|| self.lookup(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_is_idempotent() {
        let mut vocabulary = TypeVocabulary::new();
        let first = vocabulary.reserve("number");
        let second = vocabulary.reserve("number");
        assert_eq!(first, Some(SyntaxKind::NumberKeyword));
        assert_eq!(first, second);
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn test_reserve_rejects_unknown_names() {
        let mut vocabulary = TypeVocabulary::new();
        assert_eq!(vocabulary.reserve("integer"), None);
        assert!(vocabulary.is_empty());
    }

    #[test]
    fn test_standard_reserves_all_labels() {
        let vocabulary = TypeVocabulary::standard();
        assert_eq!(vocabulary.len(), 8);
        assert_eq!(vocabulary.labels().count(), 8);
        assert_eq!(vocabulary.label_of(SyntaxKind::AnyKeyword), Some(TypeLabel::Any));
        assert_eq!(vocabulary.label_of(SyntaxKind::NullKeyword), Some(TypeLabel::Null));
        assert_eq!(vocabulary.label_of(SyntaxKind::Identifier), None);
    }

    #[test]
    fn test_label_of_requires_reservation() {
        let mut vocabulary = TypeVocabulary::new();
        vocabulary.reserve("string");
        assert!(vocabulary.contains(SyntaxKind::StringKeyword));
        assert!(!vocabulary.contains(SyntaxKind::NumberKeyword));
        assert!(!vocabulary.contains(SyntaxKind::VoidKeyword));
    }

    #[test]
    fn test_classifier_prefers_base_keywords() {
        let vocabulary = TypeVocabulary::standard();
        assert_eq!(vocabulary.classify_word("void"), Some(SyntaxKind::VoidKeyword));
        assert_eq!(vocabulary.classify_word("var"), Some(SyntaxKind::VarKeyword));
        assert_eq!(vocabulary.classify_word("boolean"), Some(SyntaxKind::BooleanKeyword));
        assert_eq!(vocabulary.classify_word("foo"), None);
        assert_eq!(BaseKeywords.classify_word("boolean"), None);
    }
}
