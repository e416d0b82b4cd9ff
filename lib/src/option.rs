//! Literal string options (`:a|b`).

use crate::{
    descriptor::Descriptor,
    value::{Kind, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMatch<'v> {
    Accepted,
    /// The value is not a string at all; reported as a type mismatch.
    NotString(Kind),
    /// A string that equals none of the options.
    Rejected(&'v str),
}

/// Compares a string value byte for byte against the option literals.
pub fn match_option<'v>(value: Option<&'v Value>, descriptor: &Descriptor) -> OptionMatch<'v> {
    let kind = Kind::of(value);
    if kind.is_nil() && descriptor.accepts_nil() {
        return OptionMatch::Accepted;
    }
    match value.and_then(Value::as_str) {
        None => OptionMatch::NotString(kind),
        Some(got) if descriptor.alternatives().iter().any(|option| *option == got) => {
            OptionMatch::Accepted
        }
        Some(got) => OptionMatch::Rejected(got),
    }
}
