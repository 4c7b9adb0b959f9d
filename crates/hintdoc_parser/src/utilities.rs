//! Parser utility functions.

use hintdoc_ast::syntax_kind::SyntaxKind;

/// Check if a token kind can start a statement. Used to resynchronise after
/// a syntax error.
pub fn can_start_statement(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::OpenBraceToken
            | SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::DoKeyword
            | SyntaxKind::WhileKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::BreakKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::WithKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::ThrowKeyword
            | SyntaxKind::TryKeyword
            | SyntaxKind::DebuggerKeyword
            | SyntaxKind::SemicolonToken
    )
}

/// Check if a token kind can begin a property or member name.
pub fn can_start_member_name(kind: SyntaxKind) -> bool {
    kind.is_identifier_like()
        || kind.is_keyword()
        || matches!(
            kind,
            SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::PrivateIdentifier
        )
}

/// Check if a `yield` followed by this token has an operand.
pub fn can_start_yield_operand(kind: SyntaxKind) -> bool {
    !matches!(
        kind,
        SyntaxKind::SemicolonToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::ColonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::EndOfFileToken
    )
}
