//! Character stream with one character of lookahead.

use std::iter::Peekable;
use std::str::Chars;

/// Yields `(current, lookahead)` pairs over source text.
///
/// Once the text is exhausted every call to [`CharStream::next`] returns
/// `None`.
pub struct CharStream<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    pending_newline: bool,
}

impl<'a> CharStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            pending_newline: false,
        }
    }

    /// The character the next call to `next` will return.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// 1-based line of the character most recently returned by `next`.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Iterator for CharStream<'_> {
    type Item = (char, Option<char>);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.chars.next()?;
        if self.pending_newline {
            self.line += 1;
        }
        self.pending_newline = current == '\n';
        Some((current, self.peek()))
    }
}
