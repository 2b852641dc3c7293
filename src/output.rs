//! Output sinks for rendering parsed programs.
//!
//! The parser never writes to a process-wide stream on its own; callers that
//! want to see the AST hand it a sink.

// Destination for rendered text, so output stays testable and injectable.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

// Discards everything.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// StdoutSink: writes output to stdout for the CLI.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_joins_emissions_with_newlines() {
        let mut buf = OutputBuffer::new();
        buf.emit("(let x 1)");
        buf.emit("(del x)");
        assert_eq!(buf.as_str(), "(let x 1)\n(del x)");
    }

    #[test]
    fn null_sink_accepts_anything() {
        let mut sink = NullSink;
        sink.emit("ignored");
    }
}
