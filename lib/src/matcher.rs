//! Type matching against descriptor alternatives.
//!
//! Each alternative is tried in three tiers: built-in names that only need
//! the value's kind, then the value's specific type name, then the checker
//! registry. The specific name is computed at most once per value.

use std::borrow::Cow;

use crate::{
    descriptor::{Descriptor, Mode},
    error::Result,
    option::{self, OptionMatch},
    registry::Registry,
    value::{Kind, Value},
};

pub struct TypeMatcher<'r> {
    registry: &'r Registry,
}

impl<'r> TypeMatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Whether `value` (`None` when absent) satisfies a single alternative.
    pub fn matches(&self, value: Option<&Value>, alternative: &str) -> Result<bool> {
        let mut specific = None;
        self.matches_one(value, Kind::of(value), &mut specific, alternative)
    }

    /// Folds [`matches`](Self::matches) over the alternatives, then applies
    /// the descriptor's mode.
    pub fn matches_any(&self, value: Option<&Value>, descriptor: &Descriptor) -> Result<bool> {
        let kind = Kind::of(value);
        match descriptor.mode() {
            Mode::Enumerated { .. } => {
                return Ok(option::match_option(value, descriptor) == OptionMatch::Accepted);
            }
            Mode::Optional if kind.is_nil() => return Ok(true),
            _ => (),
        }

        let mut specific = None;
        let mut matched = false;
        for alternative in descriptor.alternatives() {
            if self.matches_one(value, kind, &mut specific, alternative)? {
                matched = true;
                break;
            }
        }
        Ok(match descriptor.mode() {
            Mode::Negated => !matched,
            _ => matched,
        })
    }

    fn matches_one<'v>(
        &self,
        value: Option<&'v Value>,
        kind: Kind,
        specific: &mut Option<Cow<'v, str>>,
        alternative: &str,
    ) -> Result<bool> {
        if builtin(kind, alternative) {
            return Ok(true);
        }

        let specific = specific.get_or_insert_with(|| match value {
            Some(value) => value.specific_type(),
            None => Cow::Borrowed(kind.name()),
        });
        if by_name(kind, &**specific, alternative) {
            return Ok(true);
        }

        let nil = Value::Nil;
        Ok(self
            .registry
            .check(alternative, value.unwrap_or(&nil))?
            .unwrap_or(false))
    }
}

/// Tier 1: names decided by the kind alone.
fn builtin(kind: Kind, alternative: &str) -> bool {
    match alternative {
        "any" => !kind.is_nil(),
        "number" => matches!(kind, Kind::Integer | Kind::Float),
        "boolean" => kind == Kind::Boolean,
        "string" => kind == Kind::String,
        "function" => kind == Kind::Function,
        "thread" => kind == Kind::Thread,
        "userdata" => matches!(kind, Kind::Userdata | Kind::File),
        _ => false,
    }
}

/// Tier 2: exact comparison with the specific type name.
fn by_name(kind: Kind, specific: &str, alternative: &str) -> bool {
    specific == alternative || (alternative == "file" && kind == Kind::File)
}
