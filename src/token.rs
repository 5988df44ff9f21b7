use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TokenKind {
    #[strum(to_string = "illegal")]
    Illegal,
    #[strum(to_string = "end of input")]
    Eof,

    // Identifiers and literals
    #[strum(to_string = "identifier")]
    Ident,
    #[strum(to_string = "integer")]
    Int,
    #[strum(to_string = "float")]
    Float,
    #[strum(to_string = "string")]
    String,

    // Operators
    #[strum(to_string = "=")]
    Assign,
    #[strum(to_string = "+")]
    Plus,
    #[strum(to_string = "-")]
    Minus,
    #[strum(to_string = "*")]
    Asterisk,
    #[strum(to_string = "/")]
    Slash,
    #[strum(to_string = "%")]
    Percent,
    #[strum(to_string = "!")]
    Bang,
    #[strum(to_string = "<")]
    LT,
    #[strum(to_string = ">")]
    GT,
    #[strum(to_string = "<=")]
    LE,
    #[strum(to_string = ">=")]
    GE,
    #[strum(to_string = "==")]
    Eq,
    #[strum(to_string = "!=")]
    NotEq,
    #[strum(to_string = "&&")]
    And,
    #[strum(to_string = "||")]
    Or,

    // Delimiters
    #[strum(to_string = ",")]
    Comma,
    #[strum(to_string = ";")]
    Semicolon,
    #[strum(to_string = ".")]
    Dot,

    #[strum(to_string = "(")]
    LParen,
    #[strum(to_string = ")")]
    RParen,
    #[strum(to_string = "{")]
    LBrace,
    #[strum(to_string = "}")]
    RBrace,

    // Keywords
    #[strum(to_string = "if")]
    If,
    #[strum(to_string = "elif")]
    Elif,
    #[strum(to_string = "else")]
    Else,
    #[strum(to_string = "for")]
    For,
    #[strum(to_string = "obj")]
    Obj,
    #[strum(to_string = "num")]
    Num,
    #[strum(to_string = "str")]
    Str,
    #[strum(to_string = "bool")]
    Bool,
    #[strum(to_string = "break")]
    Break,
    #[strum(to_string = "continue")]
    Continue,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Elif
                | Self::Else
                | Self::For
                | Self::Obj
                | Self::Num
                | Self::Str
                | Self::Bool
                | Self::Break
                | Self::Continue
        )
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(self, Self::Num | Self::Str | Self::Bool)
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<String, TokenKind> = TokenKind::iter()
        .filter(|kind| kind.is_keyword())
        .map(|kind| (kind.to_string(), kind))
        .collect();
}

/// Classifies an identifier-shaped word. `true` and `false` stay identifiers.
pub fn lookup_ident(text: &str) -> TokenKind {
    KEYWORDS.get(text).copied().unwrap_or(TokenKind::Ident)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lookup_ident() {
        let cases = [
            ("if", TokenKind::If),
            ("elif", TokenKind::Elif),
            ("else", TokenKind::Else),
            ("for", TokenKind::For),
            ("obj", TokenKind::Obj),
            ("num", TokenKind::Num),
            ("str", TokenKind::Str),
            ("bool", TokenKind::Bool),
            ("break", TokenKind::Break),
            ("continue", TokenKind::Continue),
            ("true", TokenKind::Ident),
            ("false", TokenKind::Ident),
            ("int", TokenKind::Ident),
            ("iffy", TokenKind::Ident),
        ];

        for (text, kind) in cases.iter() {
            assert_eq!(lookup_ident(text), *kind, "{}", text);
        }
    }
}
