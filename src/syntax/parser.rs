//! Ark Parser - grammar rules and the top-level driver
//!
//! Converts Ark source code into a [`Node`] tree. Every grammar rule returns a
//! [`RuleResult`]:
//!
//! - `Ok(Some(node))`: the form matched and exactly its span was consumed.
//! - `Ok(None)`: the form's leading keyword was not there; nothing was consumed.
//! - `Err(_)`: the rule committed to its keyword but the rest of the form is
//!   malformed. This aborts the whole parse.
//!
//! Ordered choice always rewinds the cursor before trying the next alternative.

use tracing::{debug, instrument, trace};

use crate::ast::Node;
use crate::output::OutputSink;
use crate::syntax::cursor::Cursor;
use crate::syntax::error::ParseError;
use crate::syntax::predicates::{IsChar, IsNot};

/// Outcome of a single grammar rule.
pub type RuleResult = Result<Option<Node>, ParseError>;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse Ark source code into a program node.
///
/// ```rust
/// let program = arkparse::parse("(let x 5)").unwrap();
/// assert_eq!(program.len(), 1);
/// assert_eq!(program.to_string(), "((let x 5))");
/// ```
pub fn parse(code: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new(code);
    parser.parse()?;
    Ok(parser.into_ast())
}

/// Settings for a single parse session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Log the finished AST at debug level.
    pub debug: bool,
}

// ============================================================================
// SPECIAL FORMS
// ============================================================================

/// Special forms recognised inside parentheses.
///
/// Only the forms in [`SpecialForm::ORDER`] have grammar rules. The rest are
/// reserved extension points: their rule always declines without consuming
/// input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    Binding,
    Deletion,
    Conditional,
    Loop,
    Import,
    Block,
    Function,
    Macro,
}

impl SpecialForm {
    /// Forms tried by the node rule, first match wins.
    pub const ORDER: [SpecialForm; 3] = [
        SpecialForm::Binding,
        SpecialForm::Deletion,
        SpecialForm::Conditional,
    ];

    pub const ALL: [SpecialForm; 8] = [
        SpecialForm::Binding,
        SpecialForm::Deletion,
        SpecialForm::Conditional,
        SpecialForm::Loop,
        SpecialForm::Import,
        SpecialForm::Block,
        SpecialForm::Function,
        SpecialForm::Macro,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpecialForm::Binding => "binding",
            SpecialForm::Deletion => "deletion",
            SpecialForm::Conditional => "conditional",
            SpecialForm::Loop => "loop",
            SpecialForm::Import => "import",
            SpecialForm::Block => "block",
            SpecialForm::Function => "function",
            SpecialForm::Macro => "macro",
        }
    }

    /// Leading keywords that commit to this form.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SpecialForm::Binding => &["let", "mut", "set"],
            SpecialForm::Deletion => &["del"],
            SpecialForm::Conditional => &["if"],
            // TODO: pick keywords once loop/import/block/function/macro get grammar rules
            _ => &[],
        }
    }

    pub fn is_implemented(self) -> bool {
        Self::ORDER.contains(&self)
    }
}

// ============================================================================
// PARSER
// ============================================================================

/// One parse session over one piece of source text.
///
/// A parser owns its cursor and the AST it builds; it is not meant to be shared
/// between threads or reused for another input.
pub struct Parser<'src> {
    cursor: Cursor<'src>,
    ast: Node,
    config: ParserConfig,
}

impl<'src> Parser<'src> {
    pub fn new(code: &'src str) -> Self {
        Self::with_config(code, ParserConfig::default())
    }

    pub fn with_config(code: &'src str, config: ParserConfig) -> Self {
        Self {
            cursor: Cursor::new(code),
            ast: Node::list(),
            config,
        }
    }

    /// Parses every top-level form until end of input.
    ///
    /// Stops at the first fatal error; forms parsed before it stay in the AST.
    #[instrument(level = "debug", skip_all, fields(len = self.cursor.source().len()))]
    pub fn parse(&mut self) -> Result<(), ParseError> {
        loop {
            self.cursor.space();
            if self.cursor.is_eof() {
                break;
            }
            if self.comment() {
                continue;
            }
            match self.node()? {
                Some(node) => self.ast.push(node),
                None => {
                    return Err(self
                        .cursor
                        .error_with_next_token("Expected '(' to start a form"))
                }
            }
        }

        debug!(forms = self.ast.len(), "parsed program");
        if self.config.debug {
            debug!(ast = %self.ast, "program ast");
        }
        Ok(())
    }

    /// The program root: a list of top-level forms in source order.
    pub fn ast(&self) -> &Node {
        &self.ast
    }

    pub fn into_ast(self) -> Node {
        self.ast
    }

    /// Writes each top-level form to `sink`, one per emission.
    pub fn emit_ast(&self, sink: &mut dyn OutputSink) {
        for form in self.ast.children() {
            sink.emit(&form.to_string());
        }
    }

    // ------------------------------------------------------------------------
    // Structural rules
    // ------------------------------------------------------------------------

    /// `#` up to and including the next newline, or to end of input.
    fn comment(&mut self) -> bool {
        if !self.cursor.accept(IsChar('#')) {
            return false;
        }
        self.cursor.skip_while(IsNot(&IsChar('\n')));
        self.cursor.accept(IsChar('\n'));
        true
    }

    fn node(&mut self) -> RuleResult {
        if !self.cursor.accept(IsChar('(')) {
            return Ok(None);
        }
        self.cursor.space();

        let position = self.cursor.position();
        for form in SpecialForm::ORDER {
            match self.form(form)? {
                Some(node) => {
                    trace!(form = form.name(), "matched");
                    self.cursor.space();
                    if self.cursor.accept(IsChar(')')) {
                        return Ok(Some(node));
                    }
                    return Err(self
                        .cursor
                        .error_with_next_token("Missing closing paren after node"));
                }
                None => self.cursor.backtrack(position),
            }
        }

        Err(self.cursor.error_with_next_token("Couldn't parse node"))
    }

    fn form(&mut self, form: SpecialForm) -> RuleResult {
        match form {
            SpecialForm::Binding => self.let_mut_set(),
            SpecialForm::Deletion => self.del(),
            SpecialForm::Conditional => self.condition(),
            SpecialForm::Loop
            | SpecialForm::Import
            | SpecialForm::Block
            | SpecialForm::Function
            | SpecialForm::Macro => Ok(None),
        }
    }

    // ------------------------------------------------------------------------
    // Special forms
    // ------------------------------------------------------------------------

    /// `(let|mut|set <symbol> <atom>)`
    fn let_mut_set(&mut self) -> RuleResult {
        let Some(keyword) = self.keyword(SpecialForm::Binding) else {
            return Ok(None);
        };
        self.cursor.space();

        let symbol = self.symbol(&keyword)?;
        self.cursor.space();

        let value = self.atom()?;
        let value = self.require(value, "Expected a value")?;

        Ok(Some(Node::List(vec![
            Node::Keyword(keyword),
            Node::Symbol(symbol),
            value,
        ])))
    }

    /// `(del <symbol>)`
    fn del(&mut self) -> RuleResult {
        let Some(keyword) = self.keyword(SpecialForm::Deletion) else {
            return Ok(None);
        };
        self.cursor.space();

        let symbol = self.symbol(&keyword)?;

        Ok(Some(Node::List(vec![
            Node::Keyword(keyword),
            Node::Symbol(symbol),
        ])))
    }

    /// `(if <atom> <atom> [<atom>])`
    fn condition(&mut self) -> RuleResult {
        let Some(keyword) = self.keyword(SpecialForm::Conditional) else {
            return Ok(None);
        };
        self.cursor.space();

        let condition = self.atom()?;
        let condition = self.require(condition, "if needs a valid condition")?;
        self.cursor.space();

        let then_branch = self.atom()?;
        let then_branch = self.require(then_branch, "Expected a value")?;
        self.cursor.space();

        let mut leaf = Node::List(vec![Node::Keyword(keyword), condition, then_branch]);
        if let Some(else_branch) = self.atom()? {
            leaf.push(else_branch);
        }
        Ok(Some(leaf))
    }

    // ------------------------------------------------------------------------
    // Atoms
    // ------------------------------------------------------------------------

    /// Ordered choice: integer, then string, then `true`/`false`/`nil`.
    fn atom(&mut self) -> RuleResult {
        let alternatives: [(&str, fn(&mut Self) -> RuleResult); 3] = [
            ("number", Self::number),
            ("string", Self::string),
            ("literal", Self::literal),
        ];

        let position = self.cursor.position();
        for (name, alternative) in alternatives {
            if let Some(node) = alternative(self)? {
                trace!(atom = name, "matched");
                return Ok(Some(node));
            }
            self.cursor.backtrack(position);
        }
        Ok(None)
    }

    fn number(&mut self) -> RuleResult {
        let start = self.cursor.position();
        let mut digits = String::new();
        if !self.cursor.signed_number(&mut digits) {
            return Ok(None);
        }
        match digits.parse::<i64>() {
            Ok(n) => Ok(Some(Node::Number(n))),
            Err(_) => {
                self.cursor.backtrack(start);
                Err(self
                    .cursor
                    .error_with_next_token("Integer literal out of range"))
            }
        }
    }

    fn string(&mut self) -> RuleResult {
        if !self.cursor.accept(IsChar('"')) {
            return Ok(None);
        }
        let mut contents = String::new();
        self.cursor.any_until(IsChar('"'), &mut contents);
        self.cursor.expect(IsChar('"'))?;
        Ok(Some(Node::String(contents)))
    }

    fn literal(&mut self) -> RuleResult {
        let mut name = String::new();
        if !self.cursor.name(&mut name) {
            return Ok(None);
        }
        match name.as_str() {
            "true" | "false" | "nil" => Ok(Some(Node::Symbol(name))),
            _ => Ok(None),
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Reads a name and keeps it only if it is one of `form`'s keywords.
    fn keyword(&mut self, form: SpecialForm) -> Option<String> {
        let start = self.cursor.position();
        let mut name = String::new();
        if self.cursor.name(&mut name) && form.keywords().contains(&name.as_str()) {
            return Some(name);
        }
        self.cursor.backtrack(start);
        None
    }

    /// The mandatory symbol operand of a binding or deletion form.
    fn symbol(&mut self, keyword: &str) -> Result<String, ParseError> {
        let mut symbol = String::new();
        if self.cursor.name(&mut symbol) {
            return Ok(symbol);
        }
        Err(self
            .cursor
            .error_with_next_token(format!("{keyword} needs a symbol")))
    }

    fn require(&mut self, node: Option<Node>, message: &str) -> Result<Node, ParseError> {
        match node {
            Some(node) => Ok(node),
            None => Err(self.cursor.error_with_next_token(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputBuffer;

    fn rule(src: &'static str, f: fn(&mut Parser<'static>) -> RuleResult) -> (RuleResult, usize) {
        let mut parser = Parser::new(src);
        let result = f(&mut parser);
        let offset = parser.cursor.offset();
        (result, offset)
    }

    #[test]
    fn rules_that_decline_consume_nothing() {
        let cases: [(&'static str, fn(&mut Parser<'static>) -> RuleResult); 7] = [
            ("delete x", Parser::let_mut_set),
            ("letter x 1", Parser::let_mut_set),
            ("let x 1", Parser::del),
            ("iffy 1 2", Parser::condition),
            ("maybe", Parser::atom),
            ("-", Parser::atom),
            ("x)", Parser::node),
        ];
        for (src, f) in cases {
            let (result, offset) = rule(src, f);
            assert!(matches!(result, Ok(None)), "expected no match for {src:?}");
            assert_eq!(offset, 0, "cursor moved for {src:?}");
        }
    }

    #[test]
    fn stub_forms_always_decline() {
        for form in SpecialForm::ALL {
            if form.is_implemented() {
                continue;
            }
            let mut parser = Parser::new("loop x");
            assert!(matches!(parser.form(form), Ok(None)));
            assert_eq!(parser.cursor.offset(), 0);
            assert!(form.keywords().is_empty());
        }
        assert_eq!(
            SpecialForm::ORDER.map(SpecialForm::name),
            ["binding", "deletion", "conditional"]
        );
    }

    #[test]
    fn atom_alternatives_in_order() {
        let (result, offset) = rule("-12 rest", Parser::atom);
        assert_eq!(result.unwrap(), Some(Node::Number(-12)));
        assert_eq!(offset, 3);

        let (result, _) = rule("\"hi there\"", Parser::atom);
        assert_eq!(result.unwrap(), Some(Node::string("hi there")));

        let (result, _) = rule("nil", Parser::atom);
        assert_eq!(result.unwrap(), Some(Node::symbol("nil")));
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let (result, _) = rule("\"open", Parser::atom);
        let err = result.unwrap_err();
        assert_eq!(err.message, "expected '\"', got end of input");
    }

    #[test]
    fn integer_overflow_is_fatal() {
        let (result, _) = rule("99999999999999999999", Parser::atom);
        let err = result.unwrap_err();
        assert_eq!(err.message, "Integer literal out of range");
        assert_eq!(err.offset, 0);
        assert_eq!(err.next_token, "99999999999999999999");

        let (result, _) = rule("-9223372036854775808", Parser::atom);
        assert_eq!(result.unwrap(), Some(Node::Number(i64::MIN)));
    }

    #[test]
    fn committed_binding_without_symbol_is_fatal() {
        let (result, _) = rule("mut 5 5", Parser::let_mut_set);
        assert_eq!(result.unwrap_err().message, "mut needs a symbol");
    }

    #[test]
    fn else_branch_is_optional() {
        let (result, _) = rule("if nil 1", Parser::condition);
        assert_eq!(result.unwrap().map(|n| n.len()), Some(3));
        let (result, _) = rule("if nil 1 \"x\"", Parser::condition);
        assert_eq!(result.unwrap().map(|n| n.len()), Some(4));
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let mut parser = Parser::new("# note\n(");
        assert!(parser.comment());
        assert_eq!(parser.cursor.peek(), Some('('));

        let mut parser = Parser::new("# trailing");
        assert!(parser.comment());
        assert!(parser.cursor.is_eof());
    }

    #[test]
    fn emit_ast_writes_one_form_per_line() {
        let mut parser = Parser::new("(let x 1) (del x)");
        parser.parse().unwrap();
        let mut buf = OutputBuffer::new();
        parser.emit_ast(&mut buf);
        assert_eq!(buf.as_str(), "(let x 1)\n(del x)");
    }

    #[test]
    fn debug_config_does_not_change_result() {
        let mut parser = Parser::with_config("(set y \"v\")", ParserConfig { debug: true });
        parser.parse().unwrap();
        assert_eq!(parser.ast().to_string(), "((set y \"v\"))");
    }

    #[test]
    fn stray_top_level_text_is_fatal() {
        let mut parser = Parser::new("(del x) oops");
        let err = parser.parse().unwrap_err();
        assert_eq!(err.message, "Expected '(' to start a form");
        assert_eq!(err.next_token, "oops");
        assert_eq!(parser.ast().len(), 1);
    }
}
