use super::error::ParseError;
use crate::ast::{AstNode, NodeType};
use crate::lexer::{Token, TokenKind};

// Binary operator precedence levels, loosest first
pub(super) const LOGICAL: u8 = 1;
pub(super) const RELATIONAL: u8 = 2;
pub(super) const ADDITIVE: u8 = 3;
pub(super) const MULTIPLICATIVE: u8 = 4;

pub(super) fn get_precedence(token_kind: TokenKind) -> Option<u8> {
    match token_kind {
        TokenKind::Or | TokenKind::And => Some(LOGICAL),
        TokenKind::Lt
        | TokenKind::Le
        | TokenKind::Gt
        | TokenKind::Ge
        | TokenKind::Eq
        | TokenKind::Ne => Some(RELATIONAL),
        TokenKind::Plus | TokenKind::Minus => Some(ADDITIVE),
        TokenKind::Times | TokenKind::Divide => Some(MULTIPLICATIVE),
        _ => None,
    }
}

// Comparisons build RelOp nodes, every other binary operator a BinOp
pub(super) fn binary_node_type(token_kind: TokenKind) -> NodeType {
    match get_precedence(token_kind) {
        Some(RELATIONAL) => NodeType::RelOp,
        _ => NodeType::BinOp,
    }
}

// Parser helper methods
impl<'a> super::Parser<'a> {
    pub(super) fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::unexpected_token(expected, &self.current)
    }

    // Helper: Check nesting depth limit
    pub(super) fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth >= self.limits.max_expr_depth {
            return Err(ParseError::NestingTooDeep {
                depth,
                max: self.limits.max_expr_depth,
                line: self.current.line,
            });
        }
        Ok(())
    }

    /// Helper: Register a freshly built node against the node limit
    pub(super) fn add_node(&mut self, node: AstNode) -> Result<AstNode, ParseError> {
        if self.node_count >= self.limits.max_ast_nodes {
            return Err(ParseError::TooManyNodes {
                max: self.limits.max_ast_nodes,
            });
        }
        self.node_count += 1;
        Ok(node)
    }

    /// Helper: Consume a specific token kind or error
    pub(super) fn consume(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        if self.current.kind != kind {
            return Err(self.unexpected(expected));
        }
        Ok(self.advance())
    }

    /// Helper: Pull the next token from the lexer, returning the current one
    pub(super) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Helper: peek current token
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub(super) fn peek_kind_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }
}
