//! Descriptor grammar.
//!
//! ```text
//! descriptor  := option-desc | type-desc
//! type-desc   := [prefix] alt ('|' alt)*
//! prefix      := '?' | '!' | '*' | '+'
//! option-desc := ':' ['?'] alt ('|' alt)*
//! ```
//!
//! `*` and `+` are only accepted through [`Descriptor::parse_trailing`].

use crate::error::{DescriptorError, InvalidReason};

pub const OPTIONAL: char = '?';
pub const NEGATED: char = '!';
pub const ENUMERATED: char = ':';
pub const ZERO_OR_MORE: char = '*';
pub const ONE_OR_MORE: char = '+';
pub const SEPARATOR: char = '|';

const PREFIXES: [char; 5] = [OPTIONAL, NEGATED, ENUMERATED, ZERO_OR_MORE, ONE_OR_MORE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Exact,
    /// Also accepts nil and absent values.
    Optional,
    Negated,
    /// Literal string options instead of type names.
    Enumerated { optional: bool },
    ZeroOrMore,
    OneOrMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor<'a> {
    source: &'a str,
    mode: Mode,
    alternatives: Vec<&'a str>,
}

impl<'a> Descriptor<'a> {
    /// Parses a descriptor for a single argument.
    pub fn parse(text: &'a str) -> Result<Self, DescriptorError> {
        Self::parse_with(text, false)
    }

    /// Parses the last descriptor of a variadic check, where `*` and `+` are legal.
    pub fn parse_trailing(text: &'a str) -> Result<Self, DescriptorError> {
        Self::parse_with(text, true)
    }

    /// Parses an option descriptor (the part after `:`): an optional `?`
    /// followed by literal values.
    pub fn parse_options(text: &'a str) -> Result<Self, DescriptorError> {
        Self::options(text, text)
    }

    fn parse_with(text: &'a str, trailing: bool) -> Result<Self, DescriptorError> {
        let invalid = |reason| DescriptorError::new(text, reason);

        let Some(prefix) = text.chars().next() else {
            return Err(invalid(InvalidReason::Empty));
        };
        let mode = match prefix {
            OPTIONAL => Mode::Optional,
            NEGATED => Mode::Negated,
            ENUMERATED => return Self::options(text, &text[1..]),
            ZERO_OR_MORE if trailing => Mode::ZeroOrMore,
            ONE_OR_MORE if trailing => Mode::OneOrMore,
            ZERO_OR_MORE | ONE_OR_MORE => {
                return Err(invalid(InvalidReason::MisplacedVariadic(prefix)));
            }
            _ => Mode::Exact,
        };

        let body = match mode {
            Mode::Exact => text,
            _ => &text[prefix.len_utf8()..],
        };
        match body.chars().next() {
            None => return Err(invalid(InvalidReason::MissingAlternatives(prefix))),
            Some(second) if mode != Mode::Exact && PREFIXES.contains(&second) => {
                return Err(invalid(InvalidReason::ConflictingPrefixes(prefix, second)));
            }
            Some(_) => (),
        }

        Ok(Self {
            source: text,
            mode,
            alternatives: split(text, body)?,
        })
    }

    fn options(source: &'a str, text: &'a str) -> Result<Self, DescriptorError> {
        let (optional, body) = match text.strip_prefix(OPTIONAL) {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if body.is_empty() {
            let reason = match optional {
                true => InvalidReason::MissingAlternatives(OPTIONAL),
                false if source.is_empty() => InvalidReason::Empty,
                false => InvalidReason::MissingAlternatives(ENUMERATED),
            };
            return Err(DescriptorError::new(source, reason));
        }
        Ok(Self {
            source,
            mode: Mode::Enumerated { optional },
            alternatives: split(source, body)?,
        })
    }

    /// The text this descriptor was parsed from, prefix included.
    pub fn source(&self) -> &'a str {
        self.source
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn alternatives(&self) -> &[&'a str] {
        &self.alternatives
    }

    /// Whether nil and absent values are accepted without matching.
    pub fn accepts_nil(&self) -> bool {
        matches!(
            self.mode,
            Mode::Optional | Mode::Enumerated { optional: true }
        )
    }

    pub fn is_variadic(&self) -> bool {
        matches!(self.mode, Mode::ZeroOrMore | Mode::OneOrMore)
    }

    /// The per-argument descriptor of a variadic one: same alternatives,
    /// no repetition prefix.
    pub fn element(&self) -> Self {
        let mode = match self.mode {
            Mode::ZeroOrMore | Mode::OneOrMore => Mode::Exact,
            mode => mode,
        };
        let source = match mode == self.mode {
            true => self.source,
            false => &self.source[1..],
        };
        Self {
            source,
            mode,
            alternatives: self.alternatives.clone(),
        }
    }
}

fn split<'a>(source: &str, body: &'a str) -> Result<Vec<&'a str>, DescriptorError> {
    body.split(SEPARATOR)
        .map(|alternative| match alternative.is_empty() {
            true => Err(DescriptorError::new(source, InvalidReason::EmptyAlternative)),
            false => Ok(alternative),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reason(text: &str) -> InvalidReason {
        Descriptor::parse(text).unwrap_err().reason
    }

    #[test]
    fn exact_alternatives_keep_their_order() {
        let descriptor = Descriptor::parse("table|integer|Point").unwrap();
        assert_eq!(descriptor.mode(), Mode::Exact);
        assert_eq!(descriptor.alternatives(), ["table", "integer", "Point"]);
    }

    #[test]
    fn prefixes() {
        assert_eq!(Descriptor::parse("?table").unwrap().mode(), Mode::Optional);
        assert_eq!(Descriptor::parse("!string").unwrap().mode(), Mode::Negated);
        let options = Descriptor::parse(":read|write").unwrap();
        assert_eq!(options.mode(), Mode::Enumerated { optional: false });
        assert_eq!(options.alternatives(), ["read", "write"]);
        let options = Descriptor::parse(":?a").unwrap();
        assert_eq!(options.mode(), Mode::Enumerated { optional: true });
        assert_eq!(options.alternatives(), ["a"]);
    }

    #[test]
    fn option_literals_are_verbatim() {
        let options = Descriptor::parse(":!x|*y").unwrap();
        assert_eq!(options.alternatives(), ["!x", "*y"]);
        let options = Descriptor::parse_options("a b|c").unwrap();
        assert_eq!(options.alternatives(), ["a b", "c"]);
        assert_eq!(options.source(), "a b|c");
    }

    #[test]
    fn malformed_descriptors() {
        assert_eq!(reason(""), InvalidReason::Empty);
        assert_eq!(reason("?"), InvalidReason::MissingAlternatives('?'));
        assert_eq!(reason("!"), InvalidReason::MissingAlternatives('!'));
        assert_eq!(reason(":"), InvalidReason::MissingAlternatives(':'));
        assert_eq!(reason(":?"), InvalidReason::MissingAlternatives('?'));
        assert_eq!(reason("a||b"), InvalidReason::EmptyAlternative);
        assert_eq!(reason("a|"), InvalidReason::EmptyAlternative);
        assert_eq!(reason("|a"), InvalidReason::EmptyAlternative);
        assert_eq!(reason("?!a"), InvalidReason::ConflictingPrefixes('?', '!'));
        assert_eq!(reason("!:a"), InvalidReason::ConflictingPrefixes('!', ':'));
        assert_eq!(reason("*string"), InvalidReason::MisplacedVariadic('*'));
        assert_eq!(reason("+string"), InvalidReason::MisplacedVariadic('+'));
        assert_eq!(
            Descriptor::parse_options("").unwrap_err().reason,
            InvalidReason::Empty
        );
    }

    #[test]
    fn trailing_descriptors() {
        let descriptor = Descriptor::parse_trailing("*string|number").unwrap();
        assert_eq!(descriptor.mode(), Mode::ZeroOrMore);
        assert!(descriptor.is_variadic());

        let element = descriptor.element();
        assert_eq!(element.mode(), Mode::Exact);
        assert_eq!(element.source(), "string|number");
        assert_eq!(element.alternatives(), ["string", "number"]);

        assert_eq!(Descriptor::parse_trailing("+a").unwrap().mode(), Mode::OneOrMore);
        assert_eq!(
            Descriptor::parse_trailing("+").unwrap_err().reason,
            InvalidReason::MissingAlternatives('+')
        );
        assert_eq!(
            Descriptor::parse_trailing("*?a").unwrap_err().reason,
            InvalidReason::ConflictingPrefixes('*', '?')
        );
        assert!(!Descriptor::parse_trailing("?a").unwrap().is_variadic());
    }
}
