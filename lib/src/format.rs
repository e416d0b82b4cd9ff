//! Natural-language rendering of descriptors for diagnostics.

use std::borrow::Cow;

use crate::{
    descriptor::{Descriptor, Mode},
    value::Kind,
};

/// Joins items the English way: `a`, `a or b`, `a, b, or c`.
pub fn join_or<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<S> = items.into_iter().collect();
    let mut out = String::new();
    let last = items.len().saturating_sub(1);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(match (i == last, items.len()) {
                (true, 2) => " or ",
                (true, _) => ", or ",
                (false, _) => ", ",
            });
        }
        out.push_str(item.as_ref());
    }
    out
}

/// What `descriptor` accepts, e.g. `nil, table, or integer`.
pub fn expected(descriptor: &Descriptor) -> String {
    let quoted = matches!(descriptor.mode(), Mode::Enumerated { .. });
    let nil = descriptor.accepts_nil().then_some(Cow::Borrowed("nil"));
    let alternatives = descriptor.alternatives().iter().map(|alternative| match quoted {
        true => Cow::Owned(format!("'{alternative}'")),
        false if *alternative == "any" => Cow::Borrowed("anything but nil"),
        false => Cow::Borrowed(*alternative),
    });
    let list = join_or(nil.into_iter().chain(alternatives));
    match descriptor.mode() {
        Mode::Negated => format!("not {list}"),
        Mode::ZeroOrMore => format!("zero or more of {list}"),
        Mode::OneOrMore => format!("one or more of {list}"),
        _ => list,
    }
}

/// `<expected> expected, got <kind>`
pub fn type_mismatch(descriptor: &Descriptor, got: Kind) -> String {
    format!("{} expected, got {}", expected(descriptor), got.name())
}

/// Mismatch against a single literal type name, e.g. `string expected, got number`.
pub fn kind_mismatch(expected: &str, got: Kind) -> String {
    format!("{expected} expected, got {}", got.name())
}

/// `<quoted options> expected, got '<actual>'`
pub fn option_mismatch(descriptor: &Descriptor, got: &str) -> String {
    format!("{} expected, got '{got}'", expected(descriptor))
}
