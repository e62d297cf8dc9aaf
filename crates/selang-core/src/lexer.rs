//! Turns source text into tokens on demand.

use crate::error::LexError;
use crate::stream::CharStream;
use crate::token::{Keyword, Symbol, Token, TokenKind};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Lazy tokenizer over a [`CharStream`].
///
/// Produces exactly one [`TokenKind::Eof`] at the end of input; after that
/// the iterator is exhausted.
pub struct Lexer<'a> {
    stream: CharStream<'a>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            stream: CharStream::new(source),
            finished: false,
        }
    }

    /// Returns the next significant token.
    ///
    /// Once end of input is reached this keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some((current, next)) = self.stream.next() else {
                return Ok(Token::new(TokenKind::Eof, self.stream.line()));
            };
            let line = self.stream.line();

            let kind = match current {
                ' ' | '\n' | '\t' | '\r' => continue,
                '(' => TokenKind::Symbol(Symbol::LParen),
                ')' => TokenKind::Symbol(Symbol::RParen),
                '[' => TokenKind::Symbol(Symbol::LBracket),
                ']' => TokenKind::Symbol(Symbol::RBracket),
                '+' => TokenKind::Symbol(Symbol::Plus),
                '-' => TokenKind::Symbol(Symbol::Minus),
                '*' => TokenKind::Symbol(Symbol::Star),
                '/' => TokenKind::Symbol(Symbol::Slash),
                '%' => TokenKind::Symbol(Symbol::Percent),
                '=' | '!' | '>' | '<' => TokenKind::Symbol(self.operator(current, next)),
                c if is_number_char(c) => TokenKind::Number(self.number(c)),
                '"' => TokenKind::Str(self.string(line)?),
                c if is_word_char(c) => {
                    let word = self.word(c);
                    match Keyword::from_word(&word) {
                        Some(keyword) => TokenKind::Keyword(keyword),
                        None => TokenKind::Identifier(word),
                    }
                }
                ch => return Err(LexError::InvalidToken { ch, line }),
            };

            return Ok(Token::new(kind, line));
        }
    }

    fn operator(&mut self, current: char, next: Option<char>) -> Symbol {
        let doubled = next == Some('=');
        if doubled {
            self.stream.next();
        }
        match (current, doubled) {
            ('=', true) => Symbol::DoubleEquals,
            ('!', true) => Symbol::NotEquals,
            ('>', true) => Symbol::GreaterEquals,
            ('<', true) => Symbol::LessEquals,
            ('=', false) => Symbol::Equals,
            ('!', false) => Symbol::Bang,
            ('>', false) => Symbol::Greater,
            _ => Symbol::Less,
        }
    }

    fn number(&mut self, first: char) -> String {
        let mut text = String::from(first);
        while let Some(c) = self.stream.peek().filter(|c| is_number_char(*c)) {
            text.push(c);
            self.stream.next();
        }
        text
    }

    fn word(&mut self, first: char) -> String {
        let mut text = String::from(first);
        while let Some(c) = self.stream.peek().filter(|c| is_word_char(*c)) {
            text.push(c);
            self.stream.next();
        }
        text
    }

    fn string(&mut self, line: usize) -> Result<String, LexError> {
        let mut s = String::new();
        loop {
            match self.stream.next() {
                Some(('"', _)) => return Ok(s),
                Some(('\\', Some(escaped))) => {
                    self.stream.next();
                    match escaped {
                        'n' => s.push('\n'),
                        't' => s.push('\t'),
                        '\\' => s.push('\\'),
                        '"' => s.push('"'),
                        c => {
                            s.push('\\');
                            s.push(c);
                        }
                    }
                }
                Some((c, _)) => s.push(c),
                None => return Err(LexError::MissingClosingQuote { line }),
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(&token, Ok(Token { kind: TokenKind::Eof, .. }) | Err(_)) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Collects the full token sequence of `source`, ending with `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}
