//! The scanner.
//!
//! Converts source text into a stream of tokens for the parser. Whitespace and
//! comments are trivia: they are skipped, but each comment is recorded exactly
//! once (even across lookahead and rescans) so comment attachment can place it
//! again after the tree is built.

use std::sync::Arc;

use crate::char_codes::*;
use crate::token::TokenInfo;
use crate::vocabulary::{BaseKeywords, WordClassifier};
use hintdoc_ast::comments::{CommentKind, CommentRecord};
use hintdoc_ast::syntax_kind::SyntaxKind;
use hintdoc_ast::types::TokenFlags;
use hintdoc_core::text::{TextRange, TextSpan};
use hintdoc_diagnostics::messages;
use hintdoc_diagnostics::{Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for lookahead.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pub pos: usize,
    pub token_start: usize,
    pub token: SyntaxKind,
    pub token_value: String,
    pub token_flags: TokenFlags,
}

/// The scanner converts source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    token: SyntaxKind,
    /// Cooked identifier name, or literal body without delimiters.
    token_value: String,
    token_flags: TokenFlags,
    classifier: Arc<dyn WordClassifier>,
    /// Comments in source order.
    comments: Vec<CommentRecord>,
    /// End of the last recorded comment. Comments starting before this were
    /// already seen by an earlier scan over the same text.
    comments_end: usize,
    shebang: Option<String>,
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    /// A scanner that recognises plain JavaScript keywords only.
    pub fn new(text: &str) -> Self {
        Self::with_classifier(text, Arc::new(BaseKeywords))
    }

    /// A scanner that classifies words through `classifier`.
    pub fn with_classifier(text: &str, classifier: Arc<dyn WordClassifier>) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            classifier,
            comments: Vec::new(),
            comments_end: 0,
            shebang: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Skip a `#!` line at the very beginning of the file, keeping its text.
    /// Call this before the first `scan()` call.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.text.len() >= 2 && self.text[0] == '#' && self.text[1] == '!' {
            self.pos = 2;
            while !self.is_eof() && !is_line_break(self.text[self.pos]) {
                self.pos += 1;
            }
            self.shebang = Some(self.chars_to_string(0, self.pos));
        }
    }

    /// The `#!` line, if the file had one.
    pub fn shebang(&self) -> Option<&str> {
        self.shebang.as_deref()
    }

    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Look ahead: save state, call f, restore state and return result.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let result = f(self);
        self.restore_state(state);
        result
    }

    /// Try scanning: save state, call f, if result is None restore state.
    pub fn try_scan<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let state = self.save_state();
        let result = f(self);
        if result.is_none() {
            self.restore_state(state);
        }
        result
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// The current token exactly as written in the source.
    pub fn token_text(&self) -> String {
        self.get_text_slice(self.token_start, self.pos)
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Comments recorded so far, in source order.
    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<CommentRecord> {
        std::mem::take(&mut self.comments)
    }

    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            pos: self.token_start as u32,
            end: self.pos as u32,
            text: self.token_value.clone(),
            flags: self.token_flags,
        }
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
    }

    /// Reset the scanner to a specific position.
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.text.len());
        self.token_start = self.pos;
        self.token = SyntaxKind::Unknown;
        self.token_value.clear();
        self.token_flags = TokenFlags::NONE;
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn report(&mut self, start: usize, end: usize, message: &DiagnosticMessage, args: &[&str]) {
        let span = TextSpan::from_bounds(start as u32, end.max(start) as u32);
        self.diagnostics.add_unique(Diagnostic::at(span, message, args));
    }

    /// Skip whitespace and comments, setting token_flags for line breaks.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                '\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                    if self.current_char() == Some('\n') {
                        self.pos += 1;
                    }
                }
                '\n' | '\u{2028}' | '\u{2029}' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                '/' if self.char_at(1) == Some('/') => {
                    let start = self.pos;
                    self.pos += 2;
                    while !self.is_eof() && !is_line_break(self.text[self.pos]) {
                        self.pos += 1;
                    }
                    self.record_comment(CommentKind::Line, start, self.pos, self.pos);
                }
                '/' if self.char_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    let mut terminated = false;
                    while !self.is_eof() {
                        if self.text[self.pos] == '*' && self.char_at(1) == Some('/') {
                            self.pos += 2;
                            terminated = true;
                            break;
                        }
                        if is_line_break(self.text[self.pos]) {
                            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        }
                        self.pos += 1;
                    }
                    let body_end = if terminated { self.pos - 2 } else { self.pos };
                    if !terminated {
                        self.report(start, self.pos, &messages::ASTERISK_SLASH_EXPECTED, &[]);
                    }
                    self.record_comment(CommentKind::Block, start, body_end, self.pos);
                }
                c if is_white_space_single_line(c) => {
                    self.pos += 1;
                }
                _ => return,
            }
        }
    }

    fn record_comment(&mut self, kind: CommentKind, start: usize, body_end: usize, end: usize) {
        if start < self.comments_end {
            return;
        }
        let body = self.chars_to_string(start + 2, body_end);
        self.comments.push(CommentRecord::original(
            kind,
            body,
            TextRange::new(start as u32, end as u32),
        ));
        self.comments_end = end;
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();

        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '(' => self.take(1, SyntaxKind::OpenParenToken),
            ')' => self.take(1, SyntaxKind::CloseParenToken),
            '{' => self.take(1, SyntaxKind::OpenBraceToken),
            '}' => self.take(1, SyntaxKind::CloseBraceToken),
            '[' => self.take(1, SyntaxKind::OpenBracketToken),
            ']' => self.take(1, SyntaxKind::CloseBracketToken),
            ';' => self.take(1, SyntaxKind::SemicolonToken),
            ',' => self.take(1, SyntaxKind::CommaToken),
            '~' => self.take(1, SyntaxKind::TildeToken),
            '@' => self.take(1, SyntaxKind::AtToken),
            ':' => self.take(1, SyntaxKind::ColonToken),
            '#' if self.char_at(1).map_or(false, is_identifier_start) => {
                self.scan_private_identifier()
            }
            '#' => self.take(1, SyntaxKind::HashToken),

            '.' => self.scan_dot(),
            '?' => self.scan_question(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equals(),
            '!' => self.scan_exclamation(),
            '+' => self.scan_doubled_or_assign('+', SyntaxKind::PlusToken, SyntaxKind::PlusPlusToken, SyntaxKind::PlusEqualsToken),
            '-' => self.scan_doubled_or_assign('-', SyntaxKind::MinusToken, SyntaxKind::MinusMinusToken, SyntaxKind::MinusEqualsToken),
            '*' => self.scan_asterisk(),
            '/' => self.scan_compound(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken),
            '%' => self.scan_compound(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            '^' => self.scan_compound(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),
            '&' => self.scan_logical('&', SyntaxKind::AmpersandToken, SyntaxKind::AmpersandEqualsToken, SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandAmpersandEqualsToken),
            '|' => self.scan_logical('|', SyntaxKind::BarToken, SyntaxKind::BarEqualsToken, SyntaxKind::BarBarToken, SyntaxKind::BarBarEqualsToken),

            '\'' | '"' => self.scan_string_literal(ch),
            '`' => self.scan_template_literal(),

            '0'..='9' => self.scan_number(),

            '\\' if self.char_at(1) == Some('u') => self.scan_identifier(),
            _ if is_identifier_start(ch) => self.scan_identifier(),

            _ => {
                self.pos += 1;
                self.report(self.token_start, self.pos, &messages::INVALID_CHARACTER, &[]);
                SyntaxKind::Unknown
            }
        };

        self.token
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    #[inline]
    fn take(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    /// `x` or `x=`.
    fn scan_compound(&mut self, plain: SyntaxKind, assign: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some('=') {
            self.take(2, assign)
        } else {
            self.take(1, plain)
        }
    }

    /// `x`, `xx` or `x=` (for `+` and `-`).
    fn scan_doubled_or_assign(
        &mut self,
        ch: char,
        plain: SyntaxKind,
        doubled: SyntaxKind,
        assign: SyntaxKind,
    ) -> SyntaxKind {
        match self.char_at(1) {
            Some(next) if next == ch => self.take(2, doubled),
            Some('=') => self.take(2, assign),
            _ => self.take(1, plain),
        }
    }

    /// `x`, `x=`, `xx` or `xx=` (for `&` and `|`).
    fn scan_logical(
        &mut self,
        ch: char,
        plain: SyntaxKind,
        assign: SyntaxKind,
        doubled: SyntaxKind,
        doubled_assign: SyntaxKind,
    ) -> SyntaxKind {
        if self.char_at(1) == Some(ch) {
            if self.char_at(2) == Some('=') {
                self.take(3, doubled_assign)
            } else {
                self.take(2, doubled)
            }
        } else {
            self.scan_compound(plain, assign)
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
            self.take(3, SyntaxKind::DotDotDotToken)
        } else if self.char_at(1).map_or(false, is_digit) {
            self.scan_number()
        } else {
            self.take(1, SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        if self.char_at(1) == Some('?') {
            if self.char_at(2) == Some('=') {
                self.take(3, SyntaxKind::QuestionQuestionEqualsToken)
            } else {
                self.take(2, SyntaxKind::QuestionQuestionToken)
            }
        } else if self.char_at(1) == Some('.') && !self.char_at(2).map_or(false, is_digit) {
            self.take(2, SyntaxKind::QuestionDotToken)
        } else {
            self.take(1, SyntaxKind::QuestionToken)
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('<'), Some('=')) => self.take(3, SyntaxKind::LessThanLessThanEqualsToken),
            (Some('<'), _) => self.take(2, SyntaxKind::LessThanLessThanToken),
            (Some('='), _) => self.take(2, SyntaxKind::LessThanEqualsToken),
            _ => self.take(1, SyntaxKind::LessThanToken),
        }
    }

    /// No type arguments exist in this grammar, so shifts are scanned greedily.
    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2), self.char_at(3)) {
            (Some('>'), Some('>'), Some('=')) => {
                self.take(4, SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken)
            }
            (Some('>'), Some('>'), _) => self.take(3, SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
            (Some('>'), Some('='), _) => self.take(3, SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (Some('>'), _, _) => self.take(2, SyntaxKind::GreaterThanGreaterThanToken),
            (Some('='), _, _) => self.take(2, SyntaxKind::GreaterThanEqualsToken),
            _ => self.take(1, SyntaxKind::GreaterThanToken),
        }
    }

    fn scan_equals(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::EqualsEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::EqualsEqualsToken),
            (Some('>'), _) => self.take(2, SyntaxKind::EqualsGreaterThanToken),
            _ => self.take(1, SyntaxKind::EqualsToken),
        }
    }

    fn scan_exclamation(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('='), Some('=')) => self.take(3, SyntaxKind::ExclamationEqualsEqualsToken),
            (Some('='), _) => self.take(2, SyntaxKind::ExclamationEqualsToken),
            _ => self.take(1, SyntaxKind::ExclamationToken),
        }
    }

    fn scan_asterisk(&mut self) -> SyntaxKind {
        match (self.char_at(1), self.char_at(2)) {
            (Some('*'), Some('=')) => self.take(3, SyntaxKind::AsteriskAsteriskEqualsToken),
            (Some('*'), _) => self.take(2, SyntaxKind::AsteriskAsteriskToken),
            (Some('='), _) => self.take(2, SyntaxKind::AsteriskEqualsToken),
            _ => self.take(1, SyntaxKind::AsteriskToken),
        }
    }

    /// Push the backslash and the escaped character verbatim.
    fn push_escape(&mut self, result: &mut String) {
        result.push('\\');
        self.pos += 1;
        if let Some(ch) = self.current_char() {
            result.push(ch);
            self.pos += 1;
            if ch == '\r' && self.current_char() == Some('\n') {
                result.push('\n');
                self.pos += 1;
            }
        }
    }

    fn scan_string_literal(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut result = String::new();
        loop {
            match self.current_char() {
                None => {
                    self.unterminated(start, &messages::UNTERMINATED_STRING_LITERAL);
                    break;
                }
                Some(ch) if ch == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => self.push_escape(&mut result),
                Some(ch) if is_line_break(ch) => {
                    self.unterminated(start, &messages::UNTERMINATED_STRING_LITERAL);
                    break;
                }
                Some(ch) => {
                    result.push(ch);
                    self.pos += 1;
                }
            }
        }
        self.token_value = result;
        SyntaxKind::StringLiteral
    }

    fn unterminated(&mut self, start: usize, message: &DiagnosticMessage) {
        self.token_flags |= TokenFlags::UNTERMINATED;
        self.report(start, self.pos, message, &[]);
    }

    /// Scan template characters up to the closing backtick or the next `${`.
    /// Returns whether a substitution follows.
    fn scan_template_chars(&mut self, start: usize) -> Option<bool> {
        let mut result = String::new();
        let outcome = loop {
            match self.current_char() {
                None => {
                    self.unterminated(start, &messages::UNTERMINATED_TEMPLATE_LITERAL);
                    break None;
                }
                Some('`') => {
                    self.pos += 1;
                    break Some(false);
                }
                Some('$') if self.char_at(1) == Some('{') => {
                    self.pos += 2;
                    break Some(true);
                }
                Some('\\') => self.push_escape(&mut result),
                Some(ch) => {
                    result.push(ch);
                    self.pos += 1;
                }
            }
        };
        self.token_value = result;
        outcome
    }

    fn scan_template_literal(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        match self.scan_template_chars(start) {
            Some(true) => SyntaxKind::TemplateHead,
            _ => SyntaxKind::NoSubstitutionTemplateLiteral,
        }
    }

    /// Rescan a `}` token as the start of a template middle or tail.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start + 1;
        self.token_value.clear();
        let start = self.token_start;
        self.token = match self.scan_template_chars(start) {
            Some(true) => SyntaxKind::TemplateMiddle,
            _ => SyntaxKind::TemplateTail,
        };
        self.token
    }

    /// Rescan the current `/` or `/=` token as a regular expression literal.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start + 1;
        let mut result = String::from("/");
        let mut in_character_class = false;

        loop {
            let Some(ch) = self.current_char().filter(|c| !is_line_break(*c)) else {
                self.unterminated(self.token_start, &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL);
                break;
            };
            if ch == '\\' {
                result.push(ch);
                self.pos += 1;
                if let Some(escaped) = self.current_char().filter(|c| !is_line_break(*c)) {
                    result.push(escaped);
                    self.pos += 1;
                }
                continue;
            }
            if ch == '[' {
                in_character_class = true;
            } else if ch == ']' {
                in_character_class = false;
            } else if ch == '/' && !in_character_class {
                result.push(ch);
                self.pos += 1;
                while let Some(flag) = self.current_char().filter(|c| is_identifier_part(*c)) {
                    result.push(flag);
                    self.pos += 1;
                }
                break;
            }
            result.push(ch);
            self.pos += 1;
        }

        self.token_value = result;
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;

        if self.text[self.pos] == '0' {
            match self.char_at(1) {
                Some('x') | Some('X') => {
                    self.token_flags |= TokenFlags::HEX_SPECIFIER;
                    return self.scan_radix_number(start, is_hex_digit);
                }
                Some('b') | Some('B') => {
                    self.token_flags |= TokenFlags::BINARY_SPECIFIER;
                    return self.scan_radix_number(start, |c| c == '0' || c == '1');
                }
                Some('o') | Some('O') => {
                    self.token_flags |= TokenFlags::OCTAL_SPECIFIER;
                    return self.scan_radix_number(start, is_octal_digit);
                }
                _ => {}
            }
        }

        self.scan_digits(is_digit);

        if self.current_char() == Some('.') {
            self.pos += 1;
            self.scan_digits(is_digit);
        }

        if let Some('e') | Some('E') = self.current_char() {
            self.pos += 1;
            self.token_flags |= TokenFlags::SCIENTIFIC;
            if let Some('+') | Some('-') = self.current_char() {
                self.pos += 1;
            }
            self.scan_digits(is_digit);
        }

        self.finish_number(start)
    }

    fn scan_radix_number(&mut self, start: usize, is_radix_digit: fn(char) -> bool) -> SyntaxKind {
        self.pos += 2;
        self.scan_digits(is_radix_digit);
        self.finish_number(start)
    }

    /// Handle the BigInt suffix and record the literal text.
    fn finish_number(&mut self, start: usize) -> SyntaxKind {
        let kind = if self.current_char() == Some('n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.chars_to_string(start, self.pos);
        kind
    }

    fn scan_digits(&mut self, is_valid: fn(char) -> bool) {
        while let Some(ch) = self.current_char() {
            if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                self.pos += 1;
            } else if is_valid(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Decode `\uXXXX` or `\u{X...}` starting at the backslash, leaving `pos`
    /// after the escape. Always consumes at least the backslash.
    fn scan_unicode_escape(&mut self) -> Option<char> {
        self.pos += 1;
        if self.current_char() != Some('u') {
            return None;
        }
        self.pos += 1;

        let mut value: u32 = 0;
        if self.current_char() == Some('{') {
            self.pos += 1;
            let mut digits = 0;
            while let Some(digit) = self.current_char().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(digit);
                digits += 1;
                self.pos += 1;
            }
            if digits == 0 || self.current_char() != Some('}') {
                return None;
            }
            self.pos += 1;
        } else {
            for _ in 0..4 {
                let digit = self.current_char().and_then(|c| c.to_digit(16))?;
                value = value * 16 + digit;
                self.pos += 1;
            }
        }
        char::from_u32(value)
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let mut name = String::new();
        let mut escaped = false;

        while let Some(ch) = self.current_char() {
            if ch == '\\' {
                let escape_start = self.pos;
                match self.scan_unicode_escape() {
                    Some(decoded) if is_identifier_char(decoded, name.is_empty()) => {
                        name.push(decoded);
                        escaped = true;
                    }
                    _ => {
                        self.token_flags |= TokenFlags::IS_INVALID;
                        self.report(escape_start, self.pos, &messages::INVALID_UNICODE_ESCAPE_SEQUENCE, &[]);
                    }
                }
            } else if is_identifier_char(ch, name.is_empty()) {
                name.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }

        if escaped {
            self.token_flags |= TokenFlags::UNICODE_ESCAPE;
        }

        let kind = self.classifier.classify_word(&name);
        if escaped && kind.is_some() {
            self.report(
                self.token_start,
                self.pos,
                &messages::ESCAPE_SEQUENCE_IN_KEYWORD_0,
                &[name.as_str()],
            );
        }
        self.token_value = name;
        kind.unwrap_or(SyntaxKind::Identifier)
    }

    /// `#name`. The value keeps the leading `#`.
    fn scan_private_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while self.current_char().map_or(false, is_identifier_part) {
            self.pos += 1;
        }
        self.token_value = self.chars_to_string(start, self.pos);
        SyntaxKind::PrivateIdentifier
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    /// A substring of the source text, clamped to its bounds.
    pub fn get_text_slice(&self, start: usize, end: usize) -> String {
        let e = end.min(self.text.len());
        let s = start.min(e);
        self.text[s..e].iter().collect()
    }

    pub fn get_text(&self) -> String {
        self.text.iter().collect()
    }
}

#[inline]
fn is_identifier_char(ch: char, first: bool) -> bool {
    if first {
        is_identifier_start(ch)
    } else {
        is_identifier_part(ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::TypeVocabulary;
    use hintdoc_diagnostics::DiagnosticCategory;

    fn annotated(text: &str) -> Scanner {
        Scanner::with_classifier(text, Arc::new(TypeVocabulary::standard()))
    }

    #[test]
    fn test_scan_simple_tokens() {
        let mut scanner = Scanner::new("( ) { } [ ] ; , :");
        assert_eq!(scanner.scan(), SyntaxKind::OpenParenToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseParenToken);
        assert_eq!(scanner.scan(), SyntaxKind::OpenBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::OpenBracketToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBracketToken);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::CommaToken);
        assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_operators() {
        let mut scanner = Scanner::new("+ ++ += - -- -= * ** *= / /= % %= === !== == !=");
        assert_eq!(scanner.scan(), SyntaxKind::PlusToken);
        assert_eq!(scanner.scan(), SyntaxKind::PlusPlusToken);
        assert_eq!(scanner.scan(), SyntaxKind::PlusEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::MinusToken);
        assert_eq!(scanner.scan(), SyntaxKind::MinusMinusToken);
        assert_eq!(scanner.scan(), SyntaxKind::MinusEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::AsteriskToken);
        assert_eq!(scanner.scan(), SyntaxKind::AsteriskAsteriskToken);
        assert_eq!(scanner.scan(), SyntaxKind::AsteriskEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.scan(), SyntaxKind::SlashEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::PercentToken);
        assert_eq!(scanner.scan(), SyntaxKind::PercentEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsEqualsEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::ExclamationEqualsEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::EqualsEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::ExclamationEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_shifts_greedily() {
        let mut scanner = Scanner::new("> >= >> >>= >>> >>>=");
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanGreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanGreaterThanEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanGreaterThanGreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken);
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let mut scanner = Scanner::new("let x = 42;");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_type_words_need_a_vocabulary() {
        let mut plain = Scanner::new("number");
        assert_eq!(plain.scan(), SyntaxKind::Identifier);

        let mut scanner = annotated("number string any");
        assert_eq!(scanner.scan(), SyntaxKind::NumberKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::StringKeyword);
        assert_eq!(scanner.scan(), SyntaxKind::AnyKeyword);
    }

    #[test]
    fn test_scan_string_literal() {
        let mut scanner = Scanner::new(r#""hello" 'world'"#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "hello");
        assert_eq!(scanner.token_text(), "\"hello\"");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), "world");
    }

    #[test]
    fn test_unterminated_string_reports_span() {
        let mut scanner = Scanner::new("'abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        let diag = &scanner.diagnostics().diagnostics()[0];
        assert_eq!(diag.code, 1002);
        assert_eq!(diag.span, Some(TextSpan::new(0, 4)));
    }

    #[test]
    fn test_scan_template_literal() {
        let mut scanner = Scanner::new("`hello`");
        assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
        assert_eq!(scanner.token_value(), "hello");
    }

    #[test]
    fn test_scan_template_parts() {
        let mut scanner = Scanner::new("`a ${x} b ${y} c`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a ");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_text(), "} b ${");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), " c");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_scan_number_formats() {
        let mut scanner = Scanner::new("42 3.14 0xff 0b1010 0o777 1_000 1e10");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "42");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "3.14");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "0xff");
        assert!(scanner.token_flags().contains(TokenFlags::HEX_SPECIFIER));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "0b1010");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "0o777");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "1_000");
        assert!(scanner.token_flags().contains(TokenFlags::CONTAINS_SEPARATOR));
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::SCIENTIFIC));
    }

    #[test]
    fn test_scan_bigint() {
        let mut scanner = Scanner::new("42n 0xFFn");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "42n");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "0xFFn");
    }

    #[test]
    fn test_comments_are_recorded() {
        let mut scanner = Scanner::new("// comment\nlet /* block */ x");
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "x");

        let comments = scanner.comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].kind, CommentKind::Line);
        assert_eq!(comments[0].text, " comment");
        assert_eq!(comments[0].range, Some(TextRange::new(0, 10)));
        assert_eq!(comments[1].kind, CommentKind::Block);
        assert_eq!(comments[1].text, " block ");
        assert_eq!(comments[1].source_text(), "/* block */");
    }

    #[test]
    fn test_lookahead_does_not_duplicate_comments() {
        let mut scanner = Scanner::new("a /* one */ b // two\nc");
        scanner.scan();
        scanner.look_ahead(|s| {
            s.scan();
            s.scan()
        });
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert_eq!(scanner.comments().len(), 2);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut scanner = Scanner::new("x /* open");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
        assert!(scanner.diagnostics().has_errors());
        assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1010);
    }

    #[test]
    fn test_unicode_escape_in_identifier() {
        let mut scanner = Scanner::new("\\u0061bc a\\u{62}");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "abc");
        assert!(scanner.token_flags().contains(TokenFlags::UNICODE_ESCAPE));
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "ab");
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_escaped_reserved_word_is_classified_with_warning() {
        let mut scanner = annotated("n\\u0075mber");
        assert_eq!(scanner.scan(), SyntaxKind::NumberKeyword);
        assert_eq!(scanner.token_value(), "number");
        let diagnostics = scanner.diagnostics().diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
        assert_eq!(diagnostics[0].message_text, "escape sequence in keyword number");
        assert_eq!(diagnostics[0].span, Some(TextSpan::new(0, 11)));
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let mut scanner = Scanner::new("a\\u00zz");
        scanner.scan();
        assert!(scanner.token_flags().contains(TokenFlags::IS_INVALID));
        assert_eq!(scanner.diagnostics().diagnostics()[0].code, 1070);
    }

    #[test]
    fn test_scan_arrow_function() {
        let mut scanner = Scanner::new("=> ??= &&= ||=");
        assert_eq!(scanner.scan(), SyntaxKind::EqualsGreaterThanToken);
        assert_eq!(scanner.scan(), SyntaxKind::QuestionQuestionEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::AmpersandAmpersandEqualsToken);
        assert_eq!(scanner.scan(), SyntaxKind::BarBarEqualsToken);
    }

    #[test]
    fn test_scan_dot_variations() {
        let mut scanner = Scanner::new(". ... ?. .5");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
        assert_eq!(scanner.scan(), SyntaxKind::DotDotDotToken);
        assert_eq!(scanner.scan(), SyntaxKind::QuestionDotToken);
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), ".5");
    }

    #[test]
    fn test_private_identifier() {
        let mut scanner = Scanner::new("#count #");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#count");
        assert_eq!(scanner.scan(), SyntaxKind::HashToken);
    }

    #[test]
    fn test_rescan_regex() {
        let mut scanner = Scanner::new("/a[/]b/gi;");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/a[/]b/gi");
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
    }

    #[test]
    fn test_shebang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\nlet x = 1;");
        scanner.skip_shebang();
        assert_eq!(scanner.shebang(), Some("#!/usr/bin/env node"));
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    }

    #[test]
    fn test_invalid_character() {
        let mut scanner = Scanner::new("a \u{0001} b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.diagnostics().diagnostics()[0].span, Some(TextSpan::new(2, 1)));
    }

    #[test]
    fn test_look_ahead() {
        let mut scanner = Scanner::new("let x = 1;");
        scanner.scan();
        let next = scanner.look_ahead(|s| s.scan());
        assert_eq!(next, SyntaxKind::Identifier);
        assert_eq!(scanner.token(), SyntaxKind::LetKeyword);
    }
}
