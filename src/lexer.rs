use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use tracing::{trace, warn};

use crate::limits::CompilerLimits;
use crate::value::Value;

// Token types

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers and literals
    Identifier,
    IntLit,
    FloatLit,
    StringLit,

    // Keywords (18 total)
    And,
    Array,
    Begin,
    Do,
    Else,
    End,
    Float,
    If,
    Integer,
    Not,
    Of,
    Or,
    Program,
    Read,
    Then,
    Var,
    While,
    Write,

    // Operators
    Plus,   // +
    Minus,  // -
    Times,  // *
    Divide, // /
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Eq,     // =
    Ne,     // <>
    Assign, // :=

    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Comma,    // ,
    Semi,     // ;
    Colon,    // :
    Dot,      // .

    Eof,
}

impl TokenKind {
    /// Upper-case name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntLit => "INTNUM",
            TokenKind::FloatLit => "FLOATNUM",
            TokenKind::StringLit => "STRING",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Semi => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::Dot => "DOT",
            TokenKind::Eof => "EOF",
            // Keywords are named by their spelling
            keyword => keyword.text().unwrap_or("KEYWORD"),
        }
    }

    /// Fixed spelling of keywords, operators and delimiters
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            TokenKind::And => "AND",
            TokenKind::Array => "ARRAY",
            TokenKind::Begin => "BEGIN",
            TokenKind::Do => "DO",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::Float => "FLOAT",
            TokenKind::If => "IF",
            TokenKind::Integer => "INTEGER",
            TokenKind::Not => "NOT",
            TokenKind::Of => "OF",
            TokenKind::Or => "OR",
            TokenKind::Program => "PROGRAM",
            TokenKind::Read => "READ",
            TokenKind::Then => "THEN",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Write => "WRITE",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Divide => "/",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Eq => "=",
            TokenKind::Ne => "<>",
            TokenKind::Assign => ":=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Identifier
            | TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::StringLit
            | TokenKind::Eof => return None,
        };
        Some(text)
    }

    /// Output bucket used by the token listing; `Eof` has none
    pub fn category(self) -> Option<TokenCategory> {
        let category = match self {
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::StringLit => {
                TokenCategory::Constant
            }
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Times
            | TokenKind::Divide
            | TokenKind::Assign => TokenCategory::ArithOp,
            TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::Eq
            | TokenKind::Ne => TokenCategory::LogicOp,
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::Comma
            | TokenKind::Semi
            | TokenKind::Colon
            | TokenKind::Dot => TokenCategory::Separator,
            TokenKind::Eof => return None,
            _ => TokenCategory::Keyword,
        };
        Some(category)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword table, keyed by upper-case spelling
pub fn lookup_keyword(upper: &str) -> Option<TokenKind> {
    let kind = match upper {
        "AND" => TokenKind::And,
        "ARRAY" => TokenKind::Array,
        "BEGIN" => TokenKind::Begin,
        "DO" => TokenKind::Do,
        "ELSE" => TokenKind::Else,
        "END" => TokenKind::End,
        "FLOAT" => TokenKind::Float,
        "IF" => TokenKind::If,
        "INTEGER" => TokenKind::Integer,
        "NOT" => TokenKind::Not,
        "OF" => TokenKind::Of,
        "OR" => TokenKind::Or,
        "PROGRAM" => TokenKind::Program,
        "READ" => TokenKind::Read,
        "THEN" => TokenKind::Then,
        "VAR" => TokenKind::Var,
        "WHILE" => TokenKind::While,
        "WRITE" => TokenKind::Write,
        _ => return None,
    };
    Some(kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Constant,
    ArithOp,
    LogicOp,
    Separator,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TokenCategory::Keyword => "KEYWORD",
            TokenCategory::Identifier => "IDENTIFIER",
            TokenCategory::Constant => "CONSTANT",
            TokenCategory::ArithOp => "ARITH-OP",
            TokenCategory::LogicOp => "LOGIC-OP",
            TokenCategory::Separator => "SEPARATOR",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Value,
    pub line: usize, // 1-indexed
}

impl Token {
    pub fn new(kind: TokenKind, value: Value, line: usize) -> Self {
        Self { kind, value, line }
    }
}

/// Tokens of one source unit plus the lexical errors reported while scanning it
#[derive(Debug, Clone)]
pub struct Tokens {
    pub list: Vec<Token>,
    pub errors: Vec<LexError>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Illegal character '{ch}' at line {line}")]
    IllegalCharacter { ch: char, line: usize },

    #[error("Invalid numeric literal '{text}' at line {line}")]
    InvalidNumber { text: String, line: usize },

    #[error("Input too large: {size} bytes (max: {max} bytes)")]
    InputTooLarge { size: usize, max: usize },
}

// Lexer

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pos: usize,
    line: usize,
    errors: Vec<LexError>,
    finished: bool,
    last_close_brace: Option<usize>, // Byte offset of the final '}'
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, limits: &CompilerLimits) -> Result<Self, LexError> {
        if source.len() > limits.max_input_size {
            return Err(LexError::InputTooLarge {
                size: source.len(),
                max: limits.max_input_size,
            });
        }

        Ok(Self {
            source,
            chars: source.char_indices().peekable(),
            pos: 0,
            line: 1,
            errors: Vec::new(),
            finished: false,
            last_close_brace: source.rfind('}'),
        })
    }

    /// Lexical errors reported so far
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    // Character navigation methods

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_char2(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn consume_char(&mut self) -> Option<char> {
        let (pos, ch) = self.chars.next()?;
        self.pos = pos + ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn consume_while<F>(&mut self, predicate: F)
    where
        F: Fn(char) -> bool,
    {
        while let Some(c) = self.peek_char() {
            if !predicate(c) {
                break;
            }
            self.consume_char();
        }
    }

    fn report(&mut self, error: LexError) {
        warn!(%error, "lexical error");
        self.errors.push(error);
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\n' => {
                    self.consume_char();
                }
                '{' if self.comment_is_closed() => {
                    self.consume_while(|c| c != '}');
                    self.consume_char(); // '}'
                }
                _ => break,
            }
        }
    }

    // An opening brace only starts a comment when a closing brace follows somewhere
    fn comment_is_closed(&mut self) -> bool {
        match (self.chars.peek(), self.last_close_brace) {
            (Some(&(open, _)), Some(close)) => close > open,
            _ => false,
        }
    }

    // Main tokenization method

    /// Scan the next token; returns `Eof` at (and after) the end of input
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            let line = self.line;
            let Some(c) = self.peek_char() else {
                return Token::new(TokenKind::Eof, Value::from(""), line);
            };

            if let Some(token) = self.scan_token(c, line) {
                trace!(kind = %token.kind, value = %token.value, line, "token");
                return token;
            }
        }
    }

    fn scan_token(&mut self, c: char, line: usize) -> Option<Token> {
        if c == '\'' {
            if let Some(text) = self.lex_string() {
                return Some(Token::new(TokenKind::StringLit, Value::Str(text), line));
            }
        } else if c.is_ascii_digit() {
            return self.lex_number(line);
        } else if c.is_ascii_alphabetic() {
            return Some(self.lex_ident_or_keyword(line));
        } else if let Some(kind) = self.lex_operator(c) {
            let text = kind.text().unwrap_or_default();
            return Some(Token::new(kind, Value::from(text), line));
        }

        self.consume_char();
        self.report(LexError::IllegalCharacter { ch: c, line });
        None
    }

    // String lexing: quote, letters only, quote

    fn lex_string(&mut self) -> Option<String> {
        let mut lookahead = self.chars.clone();
        lookahead.next(); // opening quote

        let mut text = String::new();
        loop {
            match lookahead.next() {
                Some((_, '\'')) => break,
                Some((_, c)) if c.is_ascii_alphabetic() => text.push(c),
                _ => return None,
            }
        }

        for _ in 0..text.len() + 2 {
            self.consume_char();
        }
        Some(text)
    }

    // Number lexing

    fn lex_number(&mut self, line: usize) -> Option<Token> {
        let start = self.pos;
        let mut is_float = false;

        self.consume_while(|c| c.is_ascii_digit());

        // A dot belongs to the literal only when a digit follows it
        if self.peek_char() == Some('.') && self.peek_char2().is_some_and(|c| c.is_ascii_digit())
        {
            self.consume_char(); // '.'
            self.consume_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        if self.exponent_follows() {
            self.consume_char(); // 'e' or 'E'
            if let Some('+') | Some('-') = self.peek_char() {
                self.consume_char();
            }
            self.consume_while(|c| c.is_ascii_digit());
            is_float = true;
        }

        let source = self.source;
        let text = &source[start..self.pos];

        let parsed = if is_float {
            text.parse::<f64>()
                .ok()
                .map(|v| Token::new(TokenKind::FloatLit, Value::Float(v), line))
        } else {
            text.parse::<i64>()
                .ok()
                .map(|v| Token::new(TokenKind::IntLit, Value::Int(v), line))
        };

        if parsed.is_none() {
            self.report(LexError::InvalidNumber {
                text: text.to_string(),
                line,
            });
        }
        parsed
    }

    // Exponent marker, optional sign, then at least one digit
    fn exponent_follows(&self) -> bool {
        let mut lookahead = self.chars.clone().map(|(_, c)| c);
        if !matches!(lookahead.next(), Some('e') | Some('E')) {
            return false;
        }
        match lookahead.next() {
            Some('+') | Some('-') => lookahead.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    // Identifier and keyword lexing

    fn lex_ident_or_keyword(&mut self, line: usize) -> Token {
        let start = self.pos;
        self.consume_while(|c| c.is_ascii_alphanumeric());

        let source = self.source;
        let text = &source[start..self.pos];
        let upper = text.to_ascii_uppercase();

        match lookup_keyword(&upper) {
            Some(kind) => Token::new(kind, Value::Str(upper), line),
            None => Token::new(TokenKind::Identifier, Value::from(text), line),
        }
    }

    // Operators and delimiters, longest match first

    fn lex_operator(&mut self, c: char) -> Option<TokenKind> {
        let (kind, width) = match (c, self.peek_char2()) {
            ('<', Some('=')) => (TokenKind::Le, 2),
            ('<', Some('>')) => (TokenKind::Ne, 2),
            ('>', Some('=')) => (TokenKind::Ge, 2),
            (':', Some('=')) => (TokenKind::Assign, 2),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', _) => (TokenKind::Gt, 1),
            (':', _) => (TokenKind::Colon, 1),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Times, 1),
            ('/', _) => (TokenKind::Divide, 1),
            ('=', _) => (TokenKind::Eq, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            ('[', _) => (TokenKind::LBracket, 1),
            (']', _) => (TokenKind::RBracket, 1),
            ('{', _) => (TokenKind::LBrace, 1),
            ('}', _) => (TokenKind::RBrace, 1),
            (',', _) => (TokenKind::Comma, 1),
            (';', _) => (TokenKind::Semi, 1),
            ('.', _) => (TokenKind::Dot, 1),
            _ => return None,
        };

        for _ in 0..width {
            self.consume_char();
        }
        Some(kind)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the single `Eof`
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

// Public API

pub fn tokenize(source: &str, limits: &CompilerLimits) -> Result<Tokens, LexError> {
    let mut lexer = Lexer::new(source, limits)?;
    let list: Vec<Token> = lexer.by_ref().collect();

    Ok(Tokens {
        list,
        errors: lexer.into_errors(),
    })
}

// Tests
