//! Fatal parse errors and the source context used to render them.
//!
//! A [`ParseError`] is the only failure the engine reports. It is raised once a
//! rule has committed to a form and cannot complete it, and it aborts the whole
//! parse. Recoverable "no match" outcomes never become errors.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Names a piece of source text for diagnostic rendering.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// The first unrecoverable syntactic violation found in the input.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParseError {
    /// What went wrong.
    pub message: String,
    /// Text from the failure point up to the next inline whitespace.
    pub next_token: String,
    /// Byte offset of the failure point.
    pub offset: usize,
    source_code: Option<Arc<NamedSource<String>>>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, next_token: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            next_token: next_token.into(),
            offset,
            source_code: None,
        }
    }

    /// Attaches the source text so miette can render a labelled snippet.
    pub fn with_source(mut self, source: &SourceContext) -> Self {
        self.source_code = Some(source.to_named_source());
        self
    }

    pub fn has_source(&self) -> bool {
        self.source_code.is_some()
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("arkparse::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = if self.next_token.is_empty() {
            "reached end of input".to_string()
        } else {
            format!("next token: `{}`", self.next_token)
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source_code
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // Without source text miette has nothing to point into.
        self.source_code.as_ref()?;
        let label = LabeledSpan::new(
            Some(self.message.clone()),
            self.offset,
            self.next_token.len(),
        );
        Some(Box::new(std::iter::once(label)))
    }
}

#[cfg(test)]
mod tests {
    use miette::Report;

    use super::*;

    #[test]
    fn display_is_the_message() {
        let err = ParseError::new("Expected a value", ")", 6);
        assert_eq!(err.to_string(), "Expected a value");
        assert_eq!(err.next_token, ")");
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn report_includes_code_help_and_label() {
        let src = SourceContext::from_file("test.ark", "(let x)");
        let err = ParseError::new("Expected a value", ")", 6).with_source(&src);
        assert!(err.has_source());
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("arkparse::parse"));
        assert!(output.contains("next token: `)`"));
        assert!(output.contains("Expected a value"));
    }

    #[test]
    fn empty_next_token_mentions_end_of_input() {
        let err = ParseError::new("Missing closing paren after node", "", 9);
        let help = err.help().map(|h| h.to_string());
        assert_eq!(help.as_deref(), Some("reached end of input"));
        assert!(err.labels().is_none());
    }
}
