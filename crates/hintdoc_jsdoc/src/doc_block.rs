//! Block comment assembly.

use std::fmt;

use hintdoc_ast::CommentRecord;

/// One tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag {
    /// `@type {T}`
    Type(&'static str),
    /// `@param {T} name`, or `@param {...T} name` for a rest parameter.
    Param {
        type_name: &'static str,
        name: String,
        rest: bool,
    },
    /// `@return {T}`
    Return(&'static str),
}

impl fmt::Display for DocTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocTag::Type(type_name) => write!(f, "@type {{{type_name}}}"),
            DocTag::Param { type_name, name, rest: false } => write!(f, "@param {{{type_name}}} {name}"),
            DocTag::Param { type_name, name, rest: true } => write!(f, "@param {{...{type_name}}} {name}"),
            DocTag::Return(type_name) => write!(f, "@return {{{type_name}}}"),
        }
    }
}

/// Tags collected for one declaration, rendered as a single `/** */` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocBlock {
    tags: Vec<DocTag>,
}

impl DocBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tag: DocTag) {
        self.tags.push(tag);
    }

    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// The comment body between `/*` and `*/`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn into_comment(self) -> CommentRecord {
        CommentRecord::synthesized(self.render())
    }
}

/// A leading `*`, one ` * @tag` line per tag, and a single space before the
/// closing delimiter.
impl fmt::Display for DocBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*")?;
        for tag in &self.tags {
            writeln!(f, " * {tag}")?;
        }
        write!(f, " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_block() {
        let mut block = DocBlock::new();
        block.push(DocTag::Type("number"));
        assert_eq!(block.render(), "*\n * @type {number}\n ");
        assert_eq!(
            block.into_comment().source_text(),
            "/**\n * @type {number}\n */"
        );
    }

    #[test]
    fn test_tag_text() {
        assert_eq!(DocTag::Return("boolean").to_string(), "@return {boolean}");
        let rest = DocTag::Param {
            type_name: "string",
            name: "names".into(),
            rest: true,
        };
        assert_eq!(rest.to_string(), "@param {...string} names");
        assert_eq!(DocBlock::new().render(), "*\n ");
    }

    #[test]
    fn test_function_block_order() {
        let mut block = DocBlock::new();
        block.push(DocTag::Param {
            type_name: "number",
            name: "a".into(),
            rest: false,
        });
        block.push(DocTag::Param {
            type_name: "*",
            name: "rest".into(),
            rest: true,
        });
        block.push(DocTag::Return("Object"));
        assert_eq!(
            block.render(),
            "*\n * @param {number} a\n * @param {...*} rest\n * @return {Object}\n "
        );
    }
}
