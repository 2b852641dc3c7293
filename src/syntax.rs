//! Syntax module for the Ark language
//!
//! Source text flows one way through this module: the [`cursor`] walks the
//! input testing [`predicates`], the grammar rules in [`parser`] turn what the
//! cursor accepts into [`crate::ast::Node`] values, and any committed-but-broken
//! form surfaces as an [`error::ParseError`].

pub mod cursor;
pub mod error;
pub mod parser;
pub mod predicates;

pub use cursor::{Cursor, Position};
pub use error::{ParseError, SourceContext};
pub use parser::{parse, Parser, ParserConfig, RuleResult, SpecialForm};
