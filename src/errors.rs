//! Errors raised outside the parsing core: reading files and walking directories.
//!
//! Parse failures are carried through unchanged so miette can still render
//! their source snippet.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::syntax::ParseError;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(arkparse::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory")]
    #[diagnostic(code(arkparse::walk))]
    Walk(#[from] walkdir::Error),

    #[error("failed to serialize AST")]
    #[diagnostic(code(arkparse::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
