//! arkparse: a backtracking parser-combinator front end for a small Lisp-like
//! scripting language.
//!
//! ```rust
//! use arkparse::ast::Node;
//!
//! let program = arkparse::parse("# bindings\n(let x 5)(del x)").unwrap();
//! assert_eq!(program.len(), 2);
//! assert_eq!(
//!     program.children()[0],
//!     Node::List(vec![Node::keyword("let"), Node::symbol("x"), Node::Number(5)])
//! );
//! ```

pub use crate::syntax::{parse, ParseError, Parser, ParserConfig};

pub mod ast;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod output;
pub mod syntax;
