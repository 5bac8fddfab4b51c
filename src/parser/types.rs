use super::{ParseError, Parser};
use crate::ast::{AstNode, NodeType};
use crate::lexer::TokenKind;

// Type parsing
impl<'a> Parser<'a> {
    /// Parse a declared type: standard type or array type
    pub(super) fn parse_type(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Integer | TokenKind::Float => self.parse_standard_type(),
            TokenKind::Array => self.parse_array_type(),
            _ => Err(self.unexpected("type ('INTEGER', 'FLOAT' or 'ARRAY')")),
        }
    }

    /// Parse INTEGER or FLOAT; the node value is the upper-case keyword
    fn parse_standard_type(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Integer | TokenKind::Float => {
                let token = self.advance();
                self.add_node(AstNode::new_terminal(NodeType::StandardType, token.value))
            }
            _ => Err(self.unexpected("'INTEGER' or 'FLOAT'")),
        }
    }

    /// Parse ARRAY [ low .. high ] OF standardType
    fn parse_array_type(&mut self) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::Array, "'ARRAY'")?;
        self.consume(TokenKind::LBracket, "'['")?;
        let dim = self.parse_dim()?;
        self.consume(TokenKind::RBracket, "']'")?;
        self.consume(TokenKind::Of, "'OF'")?;
        let element = self.parse_standard_type()?;

        self.add_node(AstNode::with_children(
            NodeType::ArrayType,
            vec![dim, element],
        ))
    }

    /// Parse the bounds of an array: intLit . . intLit
    fn parse_dim(&mut self) -> Result<AstNode, ParseError> {
        let low = self.consume(TokenKind::IntLit, "integer lower bound")?;
        let low = self.add_node(AstNode::new_terminal(NodeType::IntConst, low.value))?;

        self.consume(TokenKind::Dot, "'..'")?;
        self.consume(TokenKind::Dot, "'..'")?;

        let high = self.consume(TokenKind::IntLit, "integer upper bound")?;
        let high = self.add_node(AstNode::new_terminal(NodeType::IntConst, high.value))?;

        self.add_node(AstNode::with_children(NodeType::Dim, vec![low, high]))
    }
}
