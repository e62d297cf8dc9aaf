//! # selang-core
//!
//! Front-end and runtime for selang, a small scripting language with
//! Indonesian keywords.
//!
//! Source text goes through a lookahead character stream, a lazy lexer and a
//! recursive-descent parser into an AST, which a tree-walking evaluator runs
//! against a mutable environment and a pair of input/output queues.
//!
//! ## Modules
//!
//! - [`stream`] - Character stream with one character of lookahead
//! - [`token`] - Token kinds and the reserved-word table
//! - [`lexer`] - Lazy tokenizer
//! - [`parser`] - Recursive-descent parser
//! - [`ast`] - Expression and statement nodes
//! - [`runtime`] - Values and expression evaluation
//! - [`environment`] - Variable frames
//! - [`executor`] - Statement execution and the per-run context
//! - [`program`] - Compiled programs and the public entry points
//!
//! ## Example
//!
//! ```
//! let program = selang_core::compile(
//!     r#"
//! baca n
//! ulangin i dari 1 sampe n
//!     tulis "baris " + i
//! yaudah
//! "#,
//! )
//! .unwrap();
//!
//! let output = program.run(["2"]).unwrap();
//! assert_eq!(output, vec!["baris 1", "baris 2"]);
//! ```

pub mod ast;
pub mod environment;
pub mod error;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod program;
pub mod runtime;
pub mod stream;
pub mod token;

pub use error::{Error, LexError, RuntimeError, SyntaxError};
pub use executor::ExecutionContext;
pub use program::{compile, Program};
pub use runtime::Value;
