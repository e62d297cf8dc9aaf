//! Token kinds and the reserved-word table.

use std::fmt;

/// Reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    Assign,
    True,
    False,
    Not,
    End,
    And,
    Or,
    For,
    RangeStart,
    RangeEnd,
    Input,
    Print,
    While,
}

/// The frozen table mapping source words to keywords.
pub const KEYWORDS: [(&str, Keyword); 16] = [
    ("kalo", Keyword::If),
    ("kalogak", Keyword::ElseIf),
    ("lainnya", Keyword::Else),
    ("itu", Keyword::Assign),
    ("benar", Keyword::True),
    ("salah", Keyword::False),
    ("bukan", Keyword::Not),
    ("yaudah", Keyword::End),
    ("dan", Keyword::And),
    ("atau", Keyword::Or),
    ("ulangin", Keyword::For),
    ("dari", Keyword::RangeStart),
    ("sampe", Keyword::RangeEnd),
    ("baca", Keyword::Input),
    ("tulis", Keyword::Print),
    ("selama", Keyword::While),
];

impl Keyword {
    /// Looks up an identifier-shaped word in the reserved-word table.
    pub fn from_word(word: &str) -> Option<Keyword> {
        KEYWORDS
            .iter()
            .find(|(text, _)| *text == word)
            .map(|(_, keyword)| *keyword)
    }

    /// The source spelling of this keyword.
    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, keyword)| *keyword == self)
            .map(|(text, _)| *text)
            .unwrap_or_default()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Punctuation and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Equals,
    Bang,
    Greater,
    Less,
    DoubleEquals,
    NotEquals,
    GreaterEquals,
    LessEquals,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Percent => "%",
            Symbol::Equals => "=",
            Symbol::Bang => "!",
            Symbol::Greater => ">",
            Symbol::Less => "<",
            Symbol::DoubleEquals => "==",
            Symbol::NotEquals => "!=",
            Symbol::GreaterEquals => ">=",
            Symbol::LessEquals => "<=",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Eof,
    Symbol(Symbol),
    /// Raw digits and dots; converted when the literal node is built.
    Number(String),
    Str(String),
    Identifier(String),
    Keyword(Keyword),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Symbol(s) => write!(f, "'{}'", s),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string \"{}\"", s),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Keyword(k) => write!(f, "'{}'", k),
        }
    }
}

/// A token together with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.kind == TokenKind::Symbol(symbol)
    }
}
