//! SyntaxKind enum - every token and node kind in the hintdoc tree.
//!
//! Tokens come first, then keywords, then the eight reserved type words, then
//! node kinds. Range checks below rely on that ordering.

/// The kind of a syntax token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken = 1,

    // Trivia
    SingleLineCommentTrivia = 2,
    MultiLineCommentTrivia = 3,
    NewLineTrivia = 4,
    WhitespaceTrivia = 5,
    ShebangTrivia = 6,

    // Literals
    NumericLiteral = 8,
    BigIntLiteral = 9,
    StringLiteral = 10,
    RegularExpressionLiteral = 13,
    NoSubstitutionTemplateLiteral = 14,

    // Pseudo-literals (template)
    TemplateHead = 15,
    TemplateMiddle = 16,
    TemplateTail = 17,

    // Punctuation
    OpenBraceToken = 18,
    CloseBraceToken = 19,
    OpenParenToken = 20,
    CloseParenToken = 21,
    OpenBracketToken = 22,
    CloseBracketToken = 23,
    DotToken = 24,
    DotDotDotToken = 25,
    SemicolonToken = 26,
    CommaToken = 27,
    QuestionDotToken = 28,
    LessThanToken = 29,
    GreaterThanToken = 31,
    LessThanEqualsToken = 32,
    GreaterThanEqualsToken = 33,
    EqualsEqualsToken = 34,
    ExclamationEqualsToken = 35,
    EqualsEqualsEqualsToken = 36,
    ExclamationEqualsEqualsToken = 37,
    EqualsGreaterThanToken = 38,
    PlusToken = 39,
    MinusToken = 40,
    AsteriskToken = 41,
    AsteriskAsteriskToken = 42,
    SlashToken = 43,
    PercentToken = 44,
    PlusPlusToken = 45,
    MinusMinusToken = 46,
    LessThanLessThanToken = 47,
    GreaterThanGreaterThanToken = 48,
    GreaterThanGreaterThanGreaterThanToken = 49,
    AmpersandToken = 50,
    BarToken = 51,
    CaretToken = 52,
    ExclamationToken = 53,
    TildeToken = 54,
    AmpersandAmpersandToken = 55,
    BarBarToken = 56,
    QuestionToken = 57,
    ColonToken = 58,
    AtToken = 59,
    QuestionQuestionToken = 60,
    HashToken = 62,

    // Assignments
    EqualsToken = 63,
    PlusEqualsToken = 64,
    MinusEqualsToken = 65,
    AsteriskEqualsToken = 66,
    AsteriskAsteriskEqualsToken = 67,
    SlashEqualsToken = 68,
    PercentEqualsToken = 69,
    LessThanLessThanEqualsToken = 70,
    GreaterThanGreaterThanEqualsToken = 71,
    GreaterThanGreaterThanGreaterThanEqualsToken = 72,
    AmpersandEqualsToken = 73,
    BarEqualsToken = 74,
    CaretEqualsToken = 75,
    BarBarEqualsToken = 76,
    AmpersandAmpersandEqualsToken = 77,
    QuestionQuestionEqualsToken = 78,

    // Identifiers
    Identifier = 79,
    PrivateIdentifier = 80,

    // Reserved words
    BreakKeyword = 81,
    CaseKeyword = 82,
    CatchKeyword = 83,
    ClassKeyword = 84,
    ConstKeyword = 85,
    ContinueKeyword = 86,
    DebuggerKeyword = 87,
    DefaultKeyword = 88,
    DeleteKeyword = 89,
    DoKeyword = 90,
    ElseKeyword = 91,
    EnumKeyword = 92,
    ExportKeyword = 93,
    ExtendsKeyword = 94,
    FalseKeyword = 95,
    FinallyKeyword = 96,
    ForKeyword = 97,
    FunctionKeyword = 98,
    IfKeyword = 99,
    ImportKeyword = 100,
    InKeyword = 101,
    InstanceOfKeyword = 102,
    NewKeyword = 103,
    NullKeyword = 104,
    ReturnKeyword = 105,
    SuperKeyword = 106,
    SwitchKeyword = 107,
    ThisKeyword = 108,
    ThrowKeyword = 109,
    TrueKeyword = 110,
    TryKeyword = 111,
    TypeOfKeyword = 112,
    VarKeyword = 113,
    VoidKeyword = 114,
    WhileKeyword = 115,
    WithKeyword = 116,

    // Strict mode reserved words
    LetKeyword = 117,
    YieldKeyword = 118,
    AwaitKeyword = 119,

    // Reserved type words, registered through the type vocabulary
    AnyKeyword = 120,
    BooleanKeyword = 121,
    NumberKeyword = 122,
    ObjectKeyword = 123,
    StringKeyword = 124,
    UndefinedKeyword = 125,

    // ========================================================================
    // Nodes
    // ========================================================================
    ComputedPropertyName = 130,
    TypeAnnotation = 131,
    Parameter = 132,

    // Binding patterns
    ObjectBindingPattern = 140,
    ArrayBindingPattern = 141,
    BindingElement = 142,

    // Expressions
    ArrayLiteralExpression = 150,
    ObjectLiteralExpression = 151,
    PropertyAccessExpression = 152,
    ElementAccessExpression = 153,
    CallExpression = 154,
    NewExpression = 155,
    TaggedTemplateExpression = 156,
    ParenthesizedExpression = 157,
    FunctionExpression = 158,
    ArrowFunction = 159,
    DeleteExpression = 160,
    TypeOfExpression = 161,
    VoidExpression = 162,
    AwaitExpression = 163,
    PrefixUnaryExpression = 164,
    PostfixUnaryExpression = 165,
    BinaryExpression = 166,
    ConditionalExpression = 167,
    TemplateExpression = 168,
    YieldExpression = 169,
    SpreadElement = 170,
    ClassExpression = 171,
    OmittedExpression = 172,
    TemplateSpan = 173,

    // Object literal members
    PropertyAssignment = 180,
    ShorthandPropertyAssignment = 181,
    SpreadAssignment = 182,

    // Class members
    PropertyDeclaration = 190,
    MethodDeclaration = 191,
    Constructor = 192,
    GetAccessor = 193,
    SetAccessor = 194,
    SemicolonClassElement = 195,
    ClassBody = 196,

    // Statements
    Block = 200,
    EmptyStatement = 201,
    VariableStatement = 202,
    ExpressionStatement = 203,
    IfStatement = 204,
    DoStatement = 205,
    WhileStatement = 206,
    ForStatement = 207,
    ForInStatement = 208,
    ForOfStatement = 209,
    ContinueStatement = 210,
    BreakStatement = 211,
    ReturnStatement = 212,
    WithStatement = 213,
    SwitchStatement = 214,
    LabeledStatement = 215,
    ThrowStatement = 216,
    TryStatement = 217,
    DebuggerStatement = 218,
    VariableDeclaration = 219,
    VariableDeclarationList = 220,
    FunctionDeclaration = 221,
    ClassDeclaration = 222,
    CaseBlock = 223,
    CaseClause = 224,
    DefaultClause = 225,
    CatchClause = 226,

    SourceFile = 240,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::UndefinedKeyword;
    pub const FIRST_TYPE_WORD: SyntaxKind = SyntaxKind::AnyKeyword;
    pub const FIRST_ASSIGNMENT: SyntaxKind = SyntaxKind::EqualsToken;
    pub const LAST_ASSIGNMENT: SyntaxKind = SyntaxKind::QuestionQuestionEqualsToken;
}

impl SyntaxKind {
    /// Whether this kind is a keyword or a reserved type word.
    #[inline]
    pub fn is_keyword(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_KEYWORD as u16 && v <= Self::LAST_KEYWORD as u16
    }

    /// Whether this kind is one of the reserved type words that are *not*
    /// JavaScript keywords (`null` and `void` are both).
    #[inline]
    pub fn is_type_word(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_TYPE_WORD as u16 && v <= Self::LAST_KEYWORD as u16
    }

    /// Whether a token of this kind can serve as an identifier reference or
    /// binding name.
    #[inline]
    pub fn is_identifier_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::LetKeyword
                | SyntaxKind::YieldKeyword
                | SyntaxKind::AwaitKeyword
        ) || self.is_type_word()
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        let v = self as u16;
        v >= Self::FIRST_ASSIGNMENT as u16 && v <= Self::LAST_ASSIGNMENT as u16
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::BigIntLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
        )
    }

    /// Get the text of a keyword kind, or None.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::BreakKeyword => Some("break"),
            SyntaxKind::CaseKeyword => Some("case"),
            SyntaxKind::CatchKeyword => Some("catch"),
            SyntaxKind::ClassKeyword => Some("class"),
            SyntaxKind::ConstKeyword => Some("const"),
            SyntaxKind::ContinueKeyword => Some("continue"),
            SyntaxKind::DebuggerKeyword => Some("debugger"),
            SyntaxKind::DefaultKeyword => Some("default"),
            SyntaxKind::DeleteKeyword => Some("delete"),
            SyntaxKind::DoKeyword => Some("do"),
            SyntaxKind::ElseKeyword => Some("else"),
            SyntaxKind::EnumKeyword => Some("enum"),
            SyntaxKind::ExportKeyword => Some("export"),
            SyntaxKind::ExtendsKeyword => Some("extends"),
            SyntaxKind::FalseKeyword => Some("false"),
            SyntaxKind::FinallyKeyword => Some("finally"),
            SyntaxKind::ForKeyword => Some("for"),
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::IfKeyword => Some("if"),
            SyntaxKind::ImportKeyword => Some("import"),
            SyntaxKind::InKeyword => Some("in"),
            SyntaxKind::InstanceOfKeyword => Some("instanceof"),
            SyntaxKind::NewKeyword => Some("new"),
            SyntaxKind::NullKeyword => Some("null"),
            SyntaxKind::ReturnKeyword => Some("return"),
            SyntaxKind::SuperKeyword => Some("super"),
            SyntaxKind::SwitchKeyword => Some("switch"),
            SyntaxKind::ThisKeyword => Some("this"),
            SyntaxKind::ThrowKeyword => Some("throw"),
            SyntaxKind::TrueKeyword => Some("true"),
            SyntaxKind::TryKeyword => Some("try"),
            SyntaxKind::TypeOfKeyword => Some("typeof"),
            SyntaxKind::VarKeyword => Some("var"),
            SyntaxKind::VoidKeyword => Some("void"),
            SyntaxKind::WhileKeyword => Some("while"),
            SyntaxKind::WithKeyword => Some("with"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::YieldKeyword => Some("yield"),
            SyntaxKind::AwaitKeyword => Some("await"),
            SyntaxKind::AnyKeyword => Some("any"),
            SyntaxKind::BooleanKeyword => Some("boolean"),
            SyntaxKind::NumberKeyword => Some("number"),
            SyntaxKind::ObjectKeyword => Some("object"),
            SyntaxKind::StringKeyword => Some("string"),
            SyntaxKind::UndefinedKeyword => Some("undefined"),
            _ => None,
        }
    }

    /// Look up a base JavaScript keyword. Reserved type words are *not*
    /// recognised here; they come from the type vocabulary.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "case" => Some(SyntaxKind::CaseKeyword),
            "catch" => Some(SyntaxKind::CatchKeyword),
            "class" => Some(SyntaxKind::ClassKeyword),
            "const" => Some(SyntaxKind::ConstKeyword),
            "continue" => Some(SyntaxKind::ContinueKeyword),
            "debugger" => Some(SyntaxKind::DebuggerKeyword),
            "default" => Some(SyntaxKind::DefaultKeyword),
            "delete" => Some(SyntaxKind::DeleteKeyword),
            "do" => Some(SyntaxKind::DoKeyword),
            "else" => Some(SyntaxKind::ElseKeyword),
            "enum" => Some(SyntaxKind::EnumKeyword),
            "export" => Some(SyntaxKind::ExportKeyword),
            "extends" => Some(SyntaxKind::ExtendsKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "finally" => Some(SyntaxKind::FinallyKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "function" => Some(SyntaxKind::FunctionKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "import" => Some(SyntaxKind::ImportKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "instanceof" => Some(SyntaxKind::InstanceOfKeyword),
            "new" => Some(SyntaxKind::NewKeyword),
            "null" => Some(SyntaxKind::NullKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "super" => Some(SyntaxKind::SuperKeyword),
            "switch" => Some(SyntaxKind::SwitchKeyword),
            "this" => Some(SyntaxKind::ThisKeyword),
            "throw" => Some(SyntaxKind::ThrowKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            "try" => Some(SyntaxKind::TryKeyword),
            "typeof" => Some(SyntaxKind::TypeOfKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "void" => Some(SyntaxKind::VoidKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            "with" => Some(SyntaxKind::WithKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "yield" => Some(SyntaxKind::YieldKeyword),
            "await" => Some(SyntaxKind::AwaitKeyword),
            _ => None,
        }
    }

    /// Get the punctuation text for a punctuation kind, or None.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::OpenBraceToken => Some("{"),
            SyntaxKind::CloseBraceToken => Some("}"),
            SyntaxKind::OpenParenToken => Some("("),
            SyntaxKind::CloseParenToken => Some(")"),
            SyntaxKind::OpenBracketToken => Some("["),
            SyntaxKind::CloseBracketToken => Some("]"),
            SyntaxKind::DotToken => Some("."),
            SyntaxKind::DotDotDotToken => Some("..."),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::CommaToken => Some(","),
            SyntaxKind::QuestionDotToken => Some("?."),
            SyntaxKind::LessThanToken => Some("<"),
            SyntaxKind::GreaterThanToken => Some(">"),
            SyntaxKind::LessThanEqualsToken => Some("<="),
            SyntaxKind::GreaterThanEqualsToken => Some(">="),
            SyntaxKind::EqualsEqualsToken => Some("=="),
            SyntaxKind::ExclamationEqualsToken => Some("!="),
            SyntaxKind::EqualsEqualsEqualsToken => Some("==="),
            SyntaxKind::ExclamationEqualsEqualsToken => Some("!=="),
            SyntaxKind::EqualsGreaterThanToken => Some("=>"),
            SyntaxKind::PlusToken => Some("+"),
            SyntaxKind::MinusToken => Some("-"),
            SyntaxKind::AsteriskToken => Some("*"),
            SyntaxKind::AsteriskAsteriskToken => Some("**"),
            SyntaxKind::SlashToken => Some("/"),
            SyntaxKind::PercentToken => Some("%"),
            SyntaxKind::PlusPlusToken => Some("++"),
            SyntaxKind::MinusMinusToken => Some("--"),
            SyntaxKind::LessThanLessThanToken => Some("<<"),
            SyntaxKind::GreaterThanGreaterThanToken => Some(">>"),
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken => Some(">>>"),
            SyntaxKind::AmpersandToken => Some("&"),
            SyntaxKind::BarToken => Some("|"),
            SyntaxKind::CaretToken => Some("^"),
            SyntaxKind::ExclamationToken => Some("!"),
            SyntaxKind::TildeToken => Some("~"),
            SyntaxKind::AmpersandAmpersandToken => Some("&&"),
            SyntaxKind::BarBarToken => Some("||"),
            SyntaxKind::QuestionToken => Some("?"),
            SyntaxKind::ColonToken => Some(":"),
            SyntaxKind::AtToken => Some("@"),
            SyntaxKind::QuestionQuestionToken => Some("??"),
            SyntaxKind::HashToken => Some("#"),
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::PlusEqualsToken => Some("+="),
            SyntaxKind::MinusEqualsToken => Some("-="),
            SyntaxKind::AsteriskEqualsToken => Some("*="),
            SyntaxKind::AsteriskAsteriskEqualsToken => Some("**="),
            SyntaxKind::SlashEqualsToken => Some("/="),
            SyntaxKind::PercentEqualsToken => Some("%="),
            SyntaxKind::LessThanLessThanEqualsToken => Some("<<="),
            SyntaxKind::GreaterThanGreaterThanEqualsToken => Some(">>="),
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken => Some(">>>="),
            SyntaxKind::AmpersandEqualsToken => Some("&="),
            SyntaxKind::BarEqualsToken => Some("|="),
            SyntaxKind::CaretEqualsToken => Some("^="),
            SyntaxKind::BarBarEqualsToken => Some("||="),
            SyntaxKind::AmpersandAmpersandEqualsToken => Some("&&="),
            SyntaxKind::QuestionQuestionEqualsToken => Some("??="),
            _ => None,
        }
    }

    /// Source text of a keyword or punctuation token.
    pub fn token_text(self) -> Option<&'static str> {
        self.keyword_text().or_else(|| self.punctuation_text())
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.token_text() {
            Some(text) => write!(f, "{}", text),
            None => write!(f, "{:?}", self),
        }
    }
}
