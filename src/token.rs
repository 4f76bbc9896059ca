use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// The lexical categories of the Clear language. `Display` yields the
/// stable tag used in parse error messages and by the token-printing REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,

    // Operators
    Assign,   // =
    Eq,       // ==
    NotEq,    // !=
    Plus,     // +
    Minus,    // -
    Bang,     // !
    Asterisk, // *
    Slash,    // /
    Lt,       // <
    Gt,       // >

    // Delimiters
    Comma,     // ,
    Semicolon, // ;
    Lparen,    // (
    Rparen,    // )
    Lbrace,    // {
    Rbrace,    // }

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Lparen => "(",
            TokenKind::Rparen => ")",
            TokenKind::Lbrace => "{",
            TokenKind::Rbrace => "}",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        };
        f.write_str(tag)
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("fn", TokenKind::Function),
        ("let", TokenKind::Let),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("return", TokenKind::Return),
    ])
});

/// Resolves an identifier run to its reserved-word kind, or `Ident` if it
/// is not a keyword.
pub fn lookup_ident(ident: &str) -> TokenKind {
    KEYWORDS.get(ident).copied().unwrap_or(TokenKind::Ident)
}

/// A single token: its kind plus the exact source substring that produced
/// it. The literal doubles as the semantic payload of identifiers and
/// integer literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Token {
        Token {
            kind,
            literal: literal.into(),
        }
    }

    pub fn eof() -> Token {
        Token::new(TokenKind::Eof, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve_to_their_kind() {
        assert_eq!(lookup_ident("fn"), TokenKind::Function);
        assert_eq!(lookup_ident("let"), TokenKind::Let);
        assert_eq!(lookup_ident("true"), TokenKind::True);
        assert_eq!(lookup_ident("false"), TokenKind::False);
        assert_eq!(lookup_ident("if"), TokenKind::If);
        assert_eq!(lookup_ident("else"), TokenKind::Else);
        assert_eq!(lookup_ident("return"), TokenKind::Return);
    }

    #[test]
    fn non_keywords_resolve_to_ident() {
        assert_eq!(lookup_ident("foobar"), TokenKind::Ident);
        assert_eq!(lookup_ident("lets"), TokenKind::Ident);
        assert_eq!(lookup_ident("_x"), TokenKind::Ident);
    }

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(TokenKind::Assign.to_string(), "=");
        assert_eq!(TokenKind::Eq.to_string(), "==");
        assert_eq!(TokenKind::NotEq.to_string(), "!=");
        assert_eq!(TokenKind::Ident.to_string(), "IDENT");
        assert_eq!(TokenKind::Function.to_string(), "FUNCTION");
        assert_eq!(TokenKind::Illegal.to_string(), "ILLEGAL");
    }
}
