use super::{ParseError, Parser};
use crate::ast::{AstNode, NodeType};
use crate::lexer::TokenKind;

// Recursive statement parsing methods
impl<'a> Parser<'a> {
    /// Parse BEGIN stmtList END
    pub(super) fn parse_compound_statement(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.check_depth(depth)?;

        self.consume(TokenKind::Begin, "'BEGIN'")?;
        let statements = self.parse_statement_list(depth + 1)?;
        self.consume(TokenKind::End, "'END' or ';'")?;

        self.add_node(AstNode::with_children(
            NodeType::CompoundStatement,
            vec![statements],
        ))
    }

    /// Parse statements separated by ';' (no trailing separator, at least one statement)
    fn parse_statement_list(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        let mut list = self.add_node(AstNode::new(NodeType::StatementList))?;

        let first = self.parse_statement(depth)?;
        list.add_child(first);

        while self.peek_kind_is(TokenKind::Semi) {
            self.advance(); // Consume ';'
            let next = self.parse_statement(depth)?;
            list.add_child(next);
        }

        Ok(list)
    }

    /// Parse a single statement
    pub(super) fn parse_statement(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.check_depth(depth)?;

        match self.peek_kind() {
            TokenKind::Identifier => self.parse_assignment(depth + 1),
            TokenKind::If => self.parse_if_statement(depth + 1),
            TokenKind::While => self.parse_while_statement(depth + 1),
            TokenKind::Read => self.parse_read(depth + 1),
            TokenKind::Write => self.parse_write(depth + 1),
            TokenKind::Begin => self.parse_compound_statement(depth + 1),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parse variable := expr
    fn parse_assignment(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        let target = self.parse_variable(depth)?;
        self.consume(TokenKind::Assign, "':='")?;
        let value = self.parse_expression(depth, 0)?;

        self.add_node(AstNode::with_children(
            NodeType::Assignment,
            vec![target, value],
        ))
    }

    /// Parse IF expr THEN statement [ELSE statement]
    /// A dangling ELSE belongs to the innermost IF
    fn parse_if_statement(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::If, "'IF'")?;
        let condition = self.parse_expression(depth, 0)?;
        self.consume(TokenKind::Then, "'THEN'")?;
        let then_branch = self.parse_statement(depth)?;

        let mut children = vec![condition, then_branch];
        if self.peek_kind_is(TokenKind::Else) {
            self.advance(); // Consume 'ELSE'
            let else_branch = self.parse_statement(depth)?;
            children.push(else_branch);
        }

        self.add_node(AstNode::with_children(NodeType::IfStatement, children))
    }

    /// Parse WHILE expr DO statement
    fn parse_while_statement(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::While, "'WHILE'")?;
        let condition = self.parse_expression(depth, 0)?;
        self.consume(TokenKind::Do, "'DO'")?;
        let body = self.parse_statement(depth)?;

        self.add_node(AstNode::with_children(
            NodeType::WhileStatement,
            vec![condition, body],
        ))
    }

    /// Parse READ ( variable )
    fn parse_read(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::Read, "'READ'")?;
        self.consume(TokenKind::LParen, "'('")?;
        let target = self.parse_variable(depth)?;
        self.consume(TokenKind::RParen, "')'")?;

        self.add_node(AstNode::with_children(NodeType::Read, vec![target]))
    }

    /// Parse WRITE ( stringLit ) or WRITE ( expr )
    fn parse_write(&mut self, depth: usize) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::Write, "'WRITE'")?;
        self.consume(TokenKind::LParen, "'('")?;

        let node = if self.peek_kind_is(TokenKind::StringLit) {
            let token = self.advance();
            let text = self.add_node(AstNode::new_terminal(NodeType::StringConst, token.value))?;
            AstNode::with_children(NodeType::WriteString, vec![text])
        } else {
            let value = self.parse_expression(depth, 0)?;
            AstNode::with_children(NodeType::WriteExpr, vec![value])
        };

        self.consume(TokenKind::RParen, "')'")?;
        self.add_node(node)
    }
}
