use super::{ParseError, Parser};
use crate::ast::{AstNode, NodeType};
use crate::lexer::TokenKind;

// Program header and declaration parsing
impl<'a> Parser<'a> {
    /// Parse a whole program: PROGRAM ident ; decls compoundStmt .
    /// Nothing may follow the final dot
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::Program, "'PROGRAM'")?;
        let name = self.parse_identifier()?;
        self.consume(TokenKind::Semi, "';'")?;

        let decls = self.parse_decls()?;
        let body = self.parse_compound_statement(0)?;

        self.consume(TokenKind::Dot, "'.'")?;
        if !self.peek_kind_is(TokenKind::Eof) {
            return Err(self.unexpected("end of input"));
        }

        self.add_node(AstNode::with_children(
            NodeType::Program,
            vec![name, decls, body],
        ))
    }

    /// Parse an identifier token into an Identifier leaf
    pub(super) fn parse_identifier(&mut self) -> Result<AstNode, ParseError> {
        let token = self.consume(TokenKind::Identifier, "identifier")?;
        self.add_node(AstNode::new_terminal(NodeType::Identifier, token.value))
    }

    /// Parse the optional declaration section: VAR declList | nothing
    fn parse_decls(&mut self) -> Result<AstNode, ParseError> {
        let mut decls = self.add_node(AstNode::new(NodeType::Decls))?;

        if self.peek_kind_is(TokenKind::Var) {
            self.advance(); // Consume 'VAR'
            let decl_list = self.parse_decl_list()?;
            decls.add_child(decl_list);
        }

        Ok(decls)
    }

    /// Parse one or more declarations: identList : type ;
    fn parse_decl_list(&mut self) -> Result<AstNode, ParseError> {
        let mut decl_list = self.add_node(AstNode::new(NodeType::DeclList))?;

        loop {
            let names = self.parse_identifier_list()?;
            self.consume(TokenKind::Colon, "':'")?;
            let ty = self.parse_type()?;
            self.consume(TokenKind::Semi, "';'")?;

            let decl = self.add_node(AstNode::with_children(NodeType::Decl, vec![names, ty]))?;
            decl_list.add_child(decl);

            // Another declaration starts with an identifier
            if !self.peek_kind_is(TokenKind::Identifier) {
                break;
            }
        }

        Ok(decl_list)
    }

    /// Parse comma-separated identifiers
    fn parse_identifier_list(&mut self) -> Result<AstNode, ParseError> {
        let mut list = self.add_node(AstNode::new(NodeType::IdentifierList))?;

        let first = self.parse_identifier()?;
        list.add_child(first);

        while self.peek_kind_is(TokenKind::Comma) {
            self.advance(); // Consume ','
            let next = self.parse_identifier()?;
            list.add_child(next);
        }

        Ok(list)
    }
}
