//! # smlc
//!
//! Front end for SML, a small Pascal-derived teaching language.
//!
//! ```text
//! Source → Lexer → Parser → AST → level-order text
//! ```
//!
//! 1. [`lexer`] turns source text into tokens on demand, skipping whitespace
//!    and `{ ... }` comments and recovering from illegal characters.
//! 2. [`parser`] pulls tokens with one token of lookahead and builds the tree,
//!    stopping at the first syntax error.
//! 3. [`ast`] holds the single generic node type used for every construct.
//! 4. [`serializer`] renders a tree breadth-first, one depth per line.
//!
//! [`limits`] bounds input size, nesting depth and tree size.

pub mod ast;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod serializer;
pub mod value;

pub use ast::{AstNode, NodeType};
pub use lexer::{LexError, Token, TokenCategory, TokenKind, Tokens};
pub use limits::CompilerLimits;
pub use parser::ParseError;
pub use value::Value;

/// Tokenize `source` with default limits
pub fn tokenize(source: &str) -> Result<Tokens, LexError> {
    lexer::tokenize(source, &CompilerLimits::default())
}

/// Parse a whole program with default limits
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    parser::parse(source, CompilerLimits::default())
}

/// Level-order rendering of a tree; `None` gives the empty string
pub fn render(root: Option<&AstNode>) -> String {
    serializer::level_order_string(root)
}
