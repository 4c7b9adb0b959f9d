//! Comment attachment.
//!
//! Runs in two passes. The first builds the tree of statement lists in the
//! file: the file itself, blocks and function bodies, class bodies, switch
//! case blocks, the statement list of each case clause, the property list
//! of each object literal, and a one-entry list for each statement embedded
//! in an `if`, a loop, `with` or a label. Every list entry remembers which
//! lists are nested inside it and which expressions it holds directly.
//!
//! The second pass places each original comment, starting from the file:
//! - inside an entry: descend into the nested list containing it; otherwise
//!   lead the expression that starts right after it, or trail the one that
//!   ends right before it, or lead the entry when neither exists
//! - after an entry on the same line with nothing but a separating comma in
//!   between: trail it
//! - otherwise lead the next entry of the list, or dangle on the list owner
//!   when there is no next entry

use hintdoc_ast::visitor::{self, AstVisitor};
use hintdoc_ast::{
    Block, CaseOrDefaultClause, ClassBody, CommentMap, CommentRecord, Expression, NodeId,
    ObjectLiteralElement, SourceFile, Statement, SyntaxKind,
};
use hintdoc_core::{LineMap, TextRange};
use hintdoc_scanner::TokenInfo;
use tracing::debug;

#[derive(Debug)]
struct ListEntry {
    id: NodeId,
    range: TextRange,
    nested: Vec<usize>,
    /// Expressions outside the nested lists, outermost first.
    expressions: Vec<(NodeId, TextRange)>,
}

#[derive(Debug)]
struct StatementList {
    owner: NodeId,
    range: TextRange,
    entries: Vec<ListEntry>,
    /// Holds one embedded statement; comments after it trail it.
    embedded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Leading(NodeId),
    Trailing(NodeId),
    Dangling(NodeId),
}

/// Pass one.
struct ListBuilder<'t> {
    tokens: &'t [TokenInfo],
    lists: Vec<StatementList>,
    /// (list, entry) currently being walked, innermost last.
    current: Vec<(usize, usize)>,
    /// Embedded statements of the statements being walked, not yet reached.
    embedded: Vec<NodeId>,
}

impl<'t> ListBuilder<'t> {
    fn new(tokens: &'t [TokenInfo]) -> Self {
        Self {
            tokens,
            lists: Vec::new(),
            current: Vec::new(),
            embedded: Vec::new(),
        }
    }

    fn open_list(&mut self, owner: NodeId, range: TextRange) -> usize {
        let index = self.lists.len();
        self.lists.push(StatementList {
            owner,
            range,
            entries: Vec::new(),
            embedded: false,
        });
        if let Some(&(list, entry)) = self.current.last() {
            self.lists[list].entries[entry].nested.push(index);
        }
        index
    }

    fn with_entry(&mut self, list: usize, id: NodeId, range: TextRange, walk: impl FnOnce(&mut Self)) {
        let entry = self.lists[list].entries.len();
        self.lists[list].entries.push(ListEntry {
            id,
            range,
            nested: Vec::new(),
            expressions: Vec::new(),
        });
        self.current.push((list, entry));
        walk(self);
        self.current.pop();
    }

    fn statement_list(&mut self, owner: NodeId, range: TextRange, statements: &[Statement<'_>]) {
        let list = self.open_list(owner, range);
        for stmt in statements {
            self.with_entry(list, stmt.id(), stmt.range(), |b| b.visit_statement(stmt));
        }
    }

    /// A one-entry list around an embedded statement. It reaches back to the
    /// token before the statement and, when the enclosing entry goes on, up
    /// to the token after it.
    fn embedded_list(&mut self, stmt: &Statement<'_>) {
        let range = stmt.range();
        let before = self.tokens.partition_point(|t| t.pos < range.pos);
        let pos = before.checked_sub(1).map_or(range.pos, |i| self.tokens[i].end);
        let after = self.tokens.partition_point(|t| t.pos < range.end);
        let limit = self
            .current
            .last()
            .map_or(range.end, |&(list, entry)| self.lists[list].entries[entry].range.end);
        let end = self.tokens.get(after).map_or(range.end, |t| t.pos.min(limit).max(range.end));

        let list = self.open_list(stmt.id(), TextRange::new(pos, end));
        self.lists[list].embedded = true;
        self.with_entry(list, stmt.id(), range, |b| b.visit_statement(stmt));
    }

    fn record_expression(&mut self, expr: &Expression<'_>) {
        if let Some(&(list, entry)) = self.current.last() {
            let data = expr.data();
            self.lists[list].entries[entry].expressions.push((data.id, data.range));
        }
    }
}

/// Statements `stmt` holds outside any block: the branches of `if`, loop
/// bodies and the bodies of `with` and labels.
fn embedded_statements<'s, 'a>(stmt: &'s Statement<'a>) -> [Option<&'s Statement<'a>>; 2] {
    match stmt {
        Statement::IfStatement(n) => [Some(n.then_statement), n.else_statement],
        Statement::DoStatement(n) => [Some(n.statement), None],
        Statement::WhileStatement(n) => [Some(n.statement), None],
        Statement::ForStatement(n) => [Some(n.statement), None],
        Statement::ForInStatement(n) => [Some(n.statement), None],
        Statement::ForOfStatement(n) => [Some(n.statement), None],
        Statement::WithStatement(n) => [Some(n.statement), None],
        Statement::LabeledStatement(n) => [Some(n.statement), None],
        _ => [None, None],
    }
}

impl<'a> AstVisitor<'a> for ListBuilder<'_> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        self.statement_list(node.data.id, node.data.range, node.statements);
    }

    fn visit_block(&mut self, node: &Block<'a>) {
        self.statement_list(node.data.id, node.data.range, node.statements);
    }

    fn visit_statement(&mut self, stmt: &Statement<'a>) {
        if let Some(index) = self.embedded.iter().rposition(|&id| id == stmt.id()) {
            self.embedded.remove(index);
            self.embedded_list(stmt);
            return;
        }
        let Statement::SwitchStatement(switch) = stmt else {
            self.embedded
                .extend(embedded_statements(stmt).into_iter().flatten().map(Statement::id));
            visitor::walk_statement(self, stmt);
            return;
        };
        self.visit_expression(switch.expression);
        let case_block = &switch.case_block;
        let list = self.open_list(case_block.data.id, case_block.data.range);
        for clause in case_block.clauses {
            let data = clause.data();
            self.with_entry(list, data.id, data.range, |b| b.visit_case_clause(clause));
        }
    }

    fn visit_case_clause(&mut self, clause: &CaseOrDefaultClause<'a>) {
        if let CaseOrDefaultClause::CaseClause(case) = clause {
            self.visit_expression(case.expression);
        }
        let data = clause.data();
        self.statement_list(data.id, data.range, clause.statements());
    }

    fn visit_expression(&mut self, expr: &Expression<'a>) {
        self.record_expression(expr);
        let Expression::ObjectLiteral(object) = expr else {
            visitor::walk_expression(self, expr);
            return;
        };
        let list = self.open_list(object.data.id, object.data.range);
        for property in object.properties {
            let data = property.data();
            self.with_entry(list, data.id, data.range, |b| match property {
                ObjectLiteralElement::PropertyAssignment(p) => {
                    b.visit_property_name(&p.name);
                    b.visit_expression(p.initializer);
                }
                ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                    if let Some(init) = p.object_assignment_initializer {
                        b.visit_expression(init);
                    }
                }
                ObjectLiteralElement::SpreadAssignment(p) => b.visit_expression(p.expression),
                ObjectLiteralElement::MethodDeclaration(m)
                | ObjectLiteralElement::GetAccessor(m)
                | ObjectLiteralElement::SetAccessor(m) => b.visit_method_declaration(m),
            });
        }
    }

    fn visit_class_body(&mut self, node: &ClassBody<'a>) {
        let list = self.open_list(node.data.id, node.data.range);
        for member in node.members {
            self.with_entry(list, member.id(), member.range(), |b| {
                visitor::walk_class_element(b, member)
            });
        }
    }
}

/// Pass two.
struct Placer<'t> {
    lists: &'t [StatementList],
    tokens: &'t [TokenInfo],
    line_map: LineMap,
}

impl Placer<'_> {
    /// Whether a token other than a comma starts in `start..end`.
    fn has_token_between(&self, start: u32, end: u32) -> bool {
        let first = self.tokens.partition_point(|t| t.pos < start);
        self.tokens[first..]
            .iter()
            .take_while(|t| t.pos < end)
            .any(|t| t.kind != SyntaxKind::CommaToken)
    }

    /// A slot on an expression of `entry` the comment sits right next to.
    fn inline_slot(&self, entry: &ListEntry, pos: u32, end: u32) -> Option<Slot> {
        let next = entry
            .expressions
            .iter()
            .find(|(_, range)| range.pos >= end && !self.has_token_between(end, range.pos));
        if let Some(&(id, _)) = next {
            return Some(Slot::Leading(id));
        }
        entry
            .expressions
            .iter()
            .find(|(_, range)| range.end <= pos && !self.has_token_between(range.end, pos))
            .map(|&(id, _)| Slot::Trailing(id))
    }

    fn slot(&self, list_index: usize, pos: u32, end: u32) -> Slot {
        let list = &self.lists[list_index];
        // First entry not wholly before the comment.
        let index = list.entries.partition_point(|e| e.range.end <= pos);

        if let Some(entry) = list.entries.get(index) {
            if entry.range.pos <= pos && end <= entry.range.end {
                for &nested in &entry.nested {
                    let range = self.lists[nested].range;
                    if range.pos <= pos && end <= range.end {
                        return self.slot(nested, pos, end);
                    }
                }
                return self.inline_slot(entry, pos, end).unwrap_or(Slot::Leading(entry.id));
            }
        }

        if index > 0 {
            let previous = &list.entries[index - 1];
            if list.embedded
                || (self.line_map.same_line(previous.range.end, pos)
                    && !self.has_token_between(previous.range.end, pos))
            {
                return Slot::Trailing(previous.id);
            }
        }

        match list.entries.get(index) {
            Some(next) => Slot::Leading(next.id),
            None => Slot::Dangling(list.owner),
        }
    }
}

/// Attach every original comment of `file` to a node in `map`.
///
/// `comments` and `tokens` must be in source order, as the parser returns them.
#[tracing::instrument(skip_all, fields(file = %file.file_name, comments = comments.len()))]
pub fn attach_comments(
    file: &SourceFile<'_>,
    comments: &[CommentRecord],
    tokens: &[TokenInfo],
    map: &mut CommentMap,
) {
    if comments.is_empty() {
        return;
    }

    let mut builder = ListBuilder::new(tokens);
    builder.visit_source_file(file);
    let placer = Placer {
        lists: &builder.lists,
        tokens,
        line_map: LineMap::new(&file.text),
    };

    for comment in comments {
        match placer.slot(0, comment.pos(), comment.end()) {
            Slot::Leading(id) => map.add_leading(id, comment.clone()),
            Slot::Trailing(id) => map.add_trailing(id, comment.clone()),
            Slot::Dangling(id) => map.add_dangling(id, comment.clone()),
        }
    }
    debug!(lists = builder.lists.len(), "attached comments");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hintdoc_ast::ClassElement;
    use hintdoc_parser::Parser;

    fn with_attached(source: &str, check: impl FnOnce(&SourceFile<'_>, &CommentMap)) {
        let arena = Bump::new();
        let parsed = Parser::new(&arena, "test.js", source).parse_source_file().unwrap();
        let mut map = CommentMap::new();
        attach_comments(&parsed.file, &parsed.comments, &parsed.tokens, &mut map);
        check(&parsed.file, &map);
    }

    fn texts(comments: &[CommentRecord]) -> Vec<&str> {
        comments.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_leading_and_trailing() {
        with_attached("// a\nvar x = 1; // b\nvar y = 2;", |file, map| {
            let x = file.statements[0].id();
            assert_eq!(texts(map.leading(x)), vec![" a"]);
            assert_eq!(texts(map.trailing(x)), vec![" b"]);
            assert!(map.get(file.statements[1].id()).is_none());
        });
    }

    #[test]
    fn test_next_line_comment_leads_next_statement() {
        with_attached("var x = 1;\n// for y\nvar y = 2;", |file, map| {
            assert!(map.trailing(file.statements[0].id()).is_empty());
            assert_eq!(texts(map.leading(file.statements[1].id())), vec![" for y"]);
        });
    }

    #[test]
    fn test_comment_at_end_of_file_dangles() {
        with_attached("var x = 1;\n/* end */", |file, map| {
            assert_eq!(texts(map.dangling(file.data.id)), vec![" end "]);
        });
    }

    #[test]
    fn test_same_line_comment_trails_previous() {
        with_attached("a(); /* x */ b();", |file, map| {
            assert_eq!(texts(map.trailing(file.statements[0].id())), vec![" x "]);
            assert!(map.leading(file.statements[1].id()).is_empty());
        });
    }

    #[test]
    fn test_comments_descend_into_function_bodies() {
        with_attached("function f() {\n  // inside\n  return 1;\n}", |file, map| {
            let Statement::FunctionDeclaration(f) = &file.statements[0] else {
                panic!("expected a function declaration");
            };
            assert!(map.get(f.data.id).is_none());
            assert_eq!(texts(map.leading(f.body.statements[0].id())), vec![" inside"]);
        });
    }

    #[test]
    fn test_empty_block_comment_dangles_on_block() {
        with_attached("if (a) { /* nothing */ }", |file, map| {
            let Statement::IfStatement(stmt) = &file.statements[0] else {
                panic!("expected an if statement");
            };
            let Statement::Block(block) = stmt.then_statement else {
                panic!("expected a block");
            };
            assert_eq!(texts(map.dangling(block.data.id)), vec![" nothing "]);
        });
    }

    #[test]
    fn test_comment_inside_expression_stays_on_expression() {
        with_attached("var x = /* one */ 1;", |file, map| {
            let Statement::VariableStatement(stmt) = &file.statements[0] else {
                panic!("expected a variable statement");
            };
            let Some(one) = stmt.declaration_list.declarations[0].initializer else {
                panic!("expected an initializer");
            };
            assert!(map.get(file.statements[0].id()).is_none());
            assert_eq!(texts(map.leading(one.data().id)), vec![" one "]);
        });
        with_attached("x = a /* inner */ + b;", |file, map| {
            let Statement::ExpressionStatement(stmt) = &file.statements[0] else {
                panic!("expected an expression statement");
            };
            let Expression::Binary(assignment) = stmt.expression else {
                panic!("expected an assignment");
            };
            let Expression::Binary(sum) = assignment.right else {
                panic!("expected a sum");
            };
            assert!(map.get(file.statements[0].id()).is_none());
            assert_eq!(texts(map.trailing(sum.left.data().id)), vec![" inner "]);
        });
    }

    #[test]
    fn test_comment_without_neighbor_leads_statement() {
        with_attached("for (;; /* nothing */) {}", |file, map| {
            assert_eq!(texts(map.leading(file.statements[0].id())), vec![" nothing "]);
        });
    }

    #[test]
    fn test_embedded_statement_comments() {
        with_attached("if (a) b(); else // else\n  c();", |file, map| {
            let Statement::IfStatement(stmt) = &file.statements[0] else {
                panic!("expected an if statement");
            };
            let Some(else_stmt) = stmt.else_statement else {
                panic!("expected an else branch");
            };
            assert!(map.get(file.statements[0].id()).is_none());
            assert_eq!(texts(map.leading(else_stmt.id())), vec![" else"]);
        });
        with_attached("if (a) b(); // then\nelse c();", |file, map| {
            let Statement::IfStatement(stmt) = &file.statements[0] else {
                panic!("expected an if statement");
            };
            assert_eq!(texts(map.trailing(stmt.then_statement.id())), vec![" then"]);
        });
        with_attached("while (a)\n  // body\n  { b(); }", |file, map| {
            let Statement::WhileStatement(stmt) = &file.statements[0] else {
                panic!("expected a while statement");
            };
            assert_eq!(texts(map.leading(stmt.statement.id())), vec![" body"]);
        });
    }

    #[test]
    fn test_class_member_comments() {
        with_attached("class A {\n  // method\n  m() {}\n}", |file, map| {
            let Statement::ClassDeclaration(class) = &file.statements[0] else {
                panic!("expected a class declaration");
            };
            let ClassElement::MethodDeclaration(m) = &class.body.members[0] else {
                panic!("expected a method");
            };
            assert_eq!(texts(map.leading(m.data.id)), vec![" method"]);
        });
    }

    #[test]
    fn test_object_literal_property_comments() {
        with_attached("var o = {\n  // first\n  a: 1, // after a\n  b: 2\n};", |file, map| {
            let Statement::VariableStatement(stmt) = &file.statements[0] else {
                panic!("expected a variable statement");
            };
            let Some(Expression::ObjectLiteral(object)) = stmt.declaration_list.declarations[0].initializer else {
                panic!("expected an object literal");
            };
            let a = object.properties[0].data().id;
            assert_eq!(texts(map.leading(a)), vec![" first"]);
            assert_eq!(texts(map.trailing(a)), vec![" after a"]);
            assert!(map.get(file.statements[0].id()).is_none());
        });
    }

    #[test]
    fn test_case_clause_comments() {
        with_attached("switch (v) {\n  // first\n  case 1:\n    a();\n}", |file, map| {
            let Statement::SwitchStatement(switch) = &file.statements[0] else {
                panic!("expected a switch statement");
            };
            let clause = &switch.case_block.clauses[0];
            assert_eq!(texts(map.leading(clause.data().id)), vec![" first"]);
        });
    }
}
