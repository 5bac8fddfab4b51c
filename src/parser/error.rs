use crate::lexer::{LexError, Token, TokenKind};
use crate::value::Value;

// Parse error; parsing stops at the first one
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at token '{value}' (type={kind}) line={line}: expected {expected}")]
    UnexpectedToken {
        kind: TokenKind,
        value: Value,
        line: usize,
        expected: &'static str,
    },

    #[error("Syntax error: unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { line: usize, expected: &'static str },

    #[error("Nesting too deep at line {line}: {depth} levels (max {max})")]
    NestingTooDeep {
        depth: usize,
        max: usize,
        line: usize,
    },

    #[error("AST node limit exceeded: more than {max} nodes")]
    TooManyNodes { max: usize },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub(super) fn unexpected_token(expected: &'static str, token: &Token) -> Self {
        match token.kind {
            TokenKind::Eof => ParseError::UnexpectedEndOfInput {
                line: token.line,
                expected,
            },
            kind => ParseError::UnexpectedToken {
                kind,
                value: token.value.clone(),
                line: token.line,
                expected,
            },
        }
    }

    /// Source line the error points at, when there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEndOfInput { line, .. }
            | ParseError::NestingTooDeep { line, .. } => Some(*line),
            ParseError::TooManyNodes { .. } | ParseError::Lex(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_message() {
        let token = Token::new(TokenKind::End, Value::from("END"), 3);
        let error = ParseError::unexpected_token("expression", &token);

        assert_eq!(
            error.to_string(),
            "Syntax error at token 'END' (type=END) line=3: expected expression"
        );
        assert_eq!(error.line(), Some(3));
    }

    #[test]
    fn test_end_of_input_message() {
        let token = Token::new(TokenKind::Eof, Value::from(""), 9);
        let error = ParseError::unexpected_token("'.'", &token);

        assert_eq!(
            error.to_string(),
            "Syntax error: unexpected end of input, expected '.'"
        );
        assert_eq!(error.line(), Some(9));
    }
}
