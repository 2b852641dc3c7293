//! Single-character predicates used by the cursor and the grammar rules.
//!
//! Every predicate is a pure test over one `char` plus a display name. The name
//! only ever shows up in diagnostics (`expected digit, got 'x'`); control flow
//! never looks at it.
//!
//! Composite predicates ([`IsNot`], [`IsEither`]) borrow the predicates they
//! wrap, so they can only live as long as their operands:
//!
//! ```rust
//! use arkparse::syntax::predicates::{CharPred, IsAlpha, IsDigit, IsEither, IsNot};
//!
//! let ident = IsEither(&IsAlpha, &IsDigit);
//! assert!(ident.test('a'));
//! assert_eq!(ident.name(), "(alphabetic | digit)");
//!
//! let not_digit = IsNot(&IsDigit);
//! assert!(!not_digit.test('7'));
//! assert_eq!(not_digit.name(), "~digit");
//! ```

// ============================================================================
// PREDICATE TRAIT
// ============================================================================

/// A named, stateless test over a single character.
pub trait CharPred {
    /// Returns true if `c` belongs to the class this predicate describes.
    fn test(&self, c: char) -> bool;

    /// Human-readable name, used verbatim in error messages.
    fn name(&self) -> String;
}

impl<P: CharPred + ?Sized> CharPred for &P {
    fn test(&self, c: char) -> bool {
        (**self).test(c)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

macro_rules! char_class {
    ($(#[$meta:meta])* $ty:ident, $name:literal, |$c:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ty;

        impl CharPred for $ty {
            fn test(&self, $c: char) -> bool {
                $body
            }

            fn name(&self) -> String {
                $name.to_string()
            }
        }
    };
}

char_class!(
    /// Any whitespace, newlines included.
    IsSpace, "space", |c| c.is_whitespace()
);
char_class!(
    /// Whitespace that does not end a line.
    IsInlineSpace, "inline space", |c| c.is_whitespace() && c != '\n' && c != '\r'
);
char_class!(IsDigit, "digit", |c| c.is_ascii_digit());
char_class!(IsUpper, "uppercase", |c| c.is_ascii_uppercase());
char_class!(IsLower, "lowercase", |c| c.is_ascii_lowercase());
char_class!(IsAlpha, "alphabetic", |c| c.is_ascii_alphabetic());
char_class!(IsAlnum, "alphanumeric", |c| c.is_ascii_alphanumeric());
char_class!(
    /// Printable ASCII, space included.
    IsPrint, "printable", |c| c == ' ' || c.is_ascii_graphic()
);
char_class!(
    /// Punctuation allowed inside identifiers.
    IsSymbol, "sym", |c| matches!(
        c,
        ':' | '!' | '?' | '@' | '_' | '-' | '+' | '*' | '/' | '|' | '=' | '<' | '>' | '%' | '$'
    )
);
char_class!(IsAny, "any", |_c| true);

/// Matches exactly one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsChar(pub char);

impl CharPred for IsChar {
    fn test(&self, c: char) -> bool {
        self.0 == c
    }

    fn name(&self) -> String {
        format!("'{}'", self.0)
    }
}

pub const IS_MINUS: IsChar = IsChar('-');

// ============================================================================
// COMBINATORS
// ============================================================================

/// Negation of a borrowed predicate.
#[derive(Clone, Copy)]
pub struct IsNot<'a>(pub &'a dyn CharPred);

impl CharPred for IsNot<'_> {
    fn test(&self, c: char) -> bool {
        !self.0.test(c)
    }

    fn name(&self) -> String {
        format!("~{}", self.0.name())
    }
}

/// Union of two borrowed predicates.
#[derive(Clone, Copy)]
pub struct IsEither<'a>(pub &'a dyn CharPred, pub &'a dyn CharPred);

impl CharPred for IsEither<'_> {
    fn test(&self, c: char) -> bool {
        self.0.test(c) || self.1.test(c)
    }

    fn name(&self) -> String {
        format!("({} | {})", self.0.name(), self.1.name())
    }
}
