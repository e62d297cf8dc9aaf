//! Error types for each phase of the pipeline.
//!
//! Every error is fatal to the current compile or run. Lexical and syntax
//! errors are raised before any statement executes; runtime errors stop the
//! run at the failing statement.

use thiserror::Error;

/// Errors raised while turning characters into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("Invalid token '{ch}' at line {line}")]
    InvalidToken { ch: char, line: usize },

    /// The input ended inside a string literal.
    #[error("Missing closing quote for string starting at line {line}")]
    MissingClosingQuote { line: usize },
}

/// Errors raised while building the AST from tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// The input ended where another token was required.
    #[error("Unexpected end of input at line {line}, expected {expected}")]
    UnexpectedEof { expected: String, line: usize },

    /// A block was never closed with `yaudah`.
    #[error("Missing 'yaudah' to close '{construct}' block opened at line {line}")]
    MissingTerminator { construct: &'static str, line: usize },

    /// A specific token was required but a different one was found.
    #[error("Expected {expected}, got {found} at line {line}")]
    Expected {
        expected: String,
        found: String,
        line: usize,
    },

    /// A number literal that is not a valid decimal.
    #[error("Invalid number literal '{text}' at line {line}")]
    InvalidNumber { text: String, line: usize },

    /// A second comparison operator directly after a comparison.
    #[error("Comparison operators cannot be chained (line {line})")]
    ChainedComparison { line: usize },

    /// Parentheses, unary operators or blocks nested past the parser's limit.
    #[error("Nesting deeper than {limit} levels at line {line}")]
    NestingTooDeep { limit: usize, line: usize },

    /// A single expression with more operators than the evaluator accepts.
    #[error("Expression with more than {limit} operators starting at line {line}")]
    ExpressionTooLarge { limit: usize, line: usize },
}

/// Errors raised while evaluating a program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A variable was read before anything was assigned to it.
    #[error("Unknown identifier '{name}'")]
    UnknownIdentifier { name: String },

    /// `baca` ran with an empty input queue.
    #[error("Missing input for '{target}'")]
    MissingInput { target: String },

    /// An operator was applied to operands of the wrong type.
    #[error("Cannot apply '{operation}' to {left} and {right}")]
    TypeMismatch {
        operation: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

/// Any error produced by compiling or running a program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Process exit code a host should use for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Lex(_) | Error::Syntax(_) => 2,
            Error::Runtime(_) => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = LexError::MissingClosingQuote { line: 3 };
        assert_eq!(err.to_string(), "Missing closing quote for string starting at line 3");

        let err = SyntaxError::MissingTerminator { construct: "kalo", line: 1 };
        assert!(err.to_string().contains("yaudah"));

        let err = RuntimeError::UnknownIdentifier { name: "foo".to_string() };
        assert_eq!(err.to_string(), "Unknown identifier 'foo'");
    }

    #[test]
    fn exit_codes_follow_phase() {
        let lex: Error = LexError::InvalidToken { ch: '@', line: 1 }.into();
        let runtime: Error = RuntimeError::MissingInput { target: "n".to_string() }.into();
        assert_eq!(lex.exit_code(), 2);
        assert_eq!(runtime.exit_code(), 3);
    }
}
