// Parser module - splits parser into logical components
mod error;
mod expressions;
mod helpers;
mod program;
mod statements;
mod types;

// Public exports
pub use error::ParseError;

use tracing::debug;

use crate::ast::AstNode;
use crate::lexer::{LexError, Lexer, Token};
use crate::limits::CompilerLimits;

// Parser structure: pulls tokens from the lexer with one token of lookahead
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    limits: CompilerLimits,
    node_count: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, limits: CompilerLimits) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source, &limits)?;
        let current = lexer.next_token();

        Ok(Self {
            lexer,
            current,
            limits,
            node_count: 0,
        })
    }

    /// Lexical errors reported while the parser pulled tokens
    pub fn lex_errors(&self) -> &[LexError] {
        self.lexer.errors()
    }

    /// Number of AST nodes built so far
    pub fn node_count(&self) -> usize {
        self.node_count
    }
}

// Public API function
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse(source: &str, limits: CompilerLimits) -> Result<AstNode, ParseError> {
    let mut parser = Parser::new(source, limits)?;
    let result = parser.parse_program();

    match &result {
        Ok(_) => debug!(nodes = parser.node_count(), "parsed program"),
        Err(error) => debug!(%error, "parse failed"),
    }
    result
}
