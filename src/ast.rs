//! AST module for the Ark language
//!
//! A parsed program is a single [`Node::List`] whose children are the
//! top-level forms in source order. Each special form is itself a `List` whose
//! first child is the form's [`Node::Keyword`].

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Discriminant of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    List,
    Symbol,
    Keyword,
    String,
    Number,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::List => "List",
            NodeType::Symbol => "Symbol",
            NodeType::Keyword => "Keyword",
            NodeType::String => "String",
            NodeType::Number => "Number",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the parsed tree.
///
/// # Examples
///
/// ```rust
/// use arkparse::ast::Node;
/// let mut form = Node::list();
/// form.push(Node::keyword("del"));
/// form.push(Node::symbol("x"));
/// assert_eq!(form.len(), 2);
/// assert_eq!(form.to_string(), "(del x)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Node {
    List(Vec<Node>),
    /// An identifier in operand position, including `true`, `false` and `nil`.
    Symbol(String),
    /// The operator of a special form (`let`, `mut`, `set`, `del`, `if`).
    Keyword(String),
    String(String),
    Number(i64),
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    pub fn list() -> Self {
        Node::List(Vec::new())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(name.into())
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Node::Keyword(name.into())
    }

    pub fn string(contents: impl Into<String>) -> Self {
        Node::String(contents.into())
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::List(_) => NodeType::List,
            Node::Symbol(_) => NodeType::Symbol,
            Node::Keyword(_) => NodeType::Keyword,
            Node::String(_) => NodeType::String,
            Node::Number(_) => NodeType::Number,
        }
    }

    /// Appends a child. Does nothing on leaf nodes, which have no children.
    pub fn push(&mut self, child: Node) {
        if let Node::List(items) = self {
            items.push(child);
        }
    }

    /// Children of a list; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::List(items) => items,
            _ => &[],
        }
    }

    pub fn into_children(self) -> Vec<Node> {
        match self {
            Node::List(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Node::Keyword(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Total number of nodes in this tree, `self` included.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(Node::count).sum::<usize>()
    }

    /// Renders the tree one node per line, children indented under their list.
    ///
    /// ```rust
    /// use arkparse::ast::Node;
    /// let node = Node::List(vec![Node::keyword("del"), Node::symbol("x")]);
    /// assert_eq!(node.pretty(), "List\n  Keyword del\n  Symbol x\n");
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        match self {
            Node::List(items) => {
                out.push_str("List\n");
                for item in items {
                    item.pretty_into(out, depth + 1);
                }
            }
            Node::String(s) => {
                out.push_str(&format!("String {s:?}\n"));
            }
            leaf => {
                out.push_str(&format!("{} {}\n", leaf.node_type(), leaf));
            }
        }
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Number(n)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Node::Symbol(s) | Node::Keyword(s) => f.write_str(s),
            Node::String(s) => write!(f, "\"{s}\""),
            Node::Number(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_ignores_leaves() {
        let mut leaf = Node::symbol("x");
        leaf.push(Node::Number(1));
        assert_eq!(leaf, Node::symbol("x"));
        assert!(leaf.is_empty());
    }

    #[test]
    fn display_nested_program() {
        let program = Node::List(vec![
            Node::List(vec![Node::keyword("let"), Node::symbol("x"), Node::Number(-5)]),
            Node::List(vec![
                Node::keyword("if"),
                Node::symbol("true"),
                Node::string("yes"),
                Node::string("no"),
            ]),
        ]);
        assert_eq!(program.to_string(), "((let x -5) (if true \"yes\" \"no\"))");
        assert_eq!(program.count(), 9);
    }

    #[test]
    fn pretty_quotes_strings() {
        let node = Node::List(vec![Node::keyword("set"), Node::symbol("s"), Node::string("a b")]);
        assert_eq!(
            node.pretty(),
            "List\n  Keyword set\n  Symbol s\n  String \"a b\"\n"
        );
    }

    #[test]
    fn accessors_match_kind() {
        assert_eq!(Node::keyword("let").as_keyword(), Some("let"));
        assert_eq!(Node::keyword("let").as_symbol(), None);
        assert_eq!(Node::from(7).as_number(), Some(7));
        assert_eq!(Node::string("s").as_str(), Some("s"));
        assert_eq!(Node::list().node_type(), NodeType::List);
        assert_eq!(NodeType::Keyword.to_string(), "Keyword");
    }

    #[test]
    fn serializes_with_type_tags() {
        let node = Node::List(vec![Node::keyword("del"), Node::symbol("x")]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"List","value":[{"type":"Keyword","value":"del"},{"type":"Symbol","value":"x"}]}"#
        );
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
