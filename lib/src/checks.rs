//! Argument validation for the function currently being called.
//!
//! ```
//! use argcheck_lib::{checks::Checks, caller::Frame, value::{Table, Value}};
//!
//! let frame = Frame::new("insert", 2, vec![Value::from(Table::new()), Value::from(5)]);
//! let checks = Checks::new(&frame);
//! checks.check_type(1, "table").unwrap();
//! let error = checks.check_type(2, "?string").unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "bad argument #2 to 'insert' (nil or string expected, got number)"
//! );
//! ```

use tracing::debug;

use crate::{
    caller::CallerContext,
    descriptor::{Descriptor, Mode},
    error::{ArgError, Error, Result},
    format,
    matcher::TypeMatcher,
    option::{self, OptionMatch},
    registry::Registry,
    value::{Kind, Value},
};

/// Validation entry points bound to one call frame.
pub struct Checks<'a, C: CallerContext + ?Sized> {
    caller: &'a C,
    registry: &'a Registry,
    level: usize,
}

impl<C: CallerContext + ?Sized> Clone for Checks<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<C: CallerContext + ?Sized> Copy for Checks<'_, C> {}

impl<'a, C: CallerContext + ?Sized> Checks<'a, C> {
    /// Checks against the process-wide registry, attributing errors to level 1.
    pub fn new(caller: &'a C) -> Self {
        Self {
            caller,
            registry: Registry::global(),
            level: 1,
        }
    }

    pub fn with_registry(self, registry: &'a Registry) -> Self {
        Self { registry, ..self }
    }

    /// Attributes raised errors to the frame `level` calls up.
    pub fn at_level(self, level: usize) -> Self {
        Self { level, ..self }
    }

    /// Checks the argument at `position` against a type descriptor, or an
    /// option descriptor when prefixed with `:`.
    pub fn check_type(&self, position: usize, descriptor: &str) -> Result<()> {
        let value = self.fetch(position)?;
        let descriptor = Descriptor::parse(descriptor)?;
        self.check_value(position, Some(&value), &descriptor)
    }

    /// Checks the argument at `position` is one of the literal strings in
    /// `descriptor` (`read|write`, `?read|write`).
    pub fn check_option(&self, position: usize, descriptor: &str) -> Result<()> {
        let value = self.fetch(position)?;
        let descriptor = Descriptor::parse_options(descriptor)?;
        self.check_value(position, Some(&value), &descriptor)
    }

    /// Checks arguments `1..=k` against `k` descriptors. A last descriptor
    /// prefixed with `*` or `+` also checks every remaining argument,
    /// variadics included; `+` requires at least one.
    pub fn check_types(&self, descriptors: &[&str]) -> Result<()> {
        let Some((last, fixed)) = descriptors.split_last() else {
            return Ok(());
        };
        let mut parsed = fixed
            .iter()
            .map(|descriptor| Descriptor::parse(descriptor))
            .collect::<Result<Vec<_>, _>>()?;
        let last = Descriptor::parse_trailing(last)?;
        let trailing = match last.is_variadic() {
            true => Some(last),
            false => {
                parsed.push(last);
                None
            }
        };

        for (i, descriptor) in parsed.iter().enumerate() {
            let position = i + 1;
            let value = self.caller.argument(position);
            self.check_value(position, value.as_ref(), descriptor)?;
        }

        let Some(trailing) = trailing else {
            return Ok(());
        };
        let element = trailing.element();
        let first = parsed.len() + 1;
        let mut position = first;
        while let Some(value) = self.caller.argument(position) {
            self.check_value(position, Some(&value), &element)?;
            position += 1;
        }
        let mut index = 1;
        while let Some(value) = self.caller.variadic(index) {
            self.check_value(position, Some(&value), &element)?;
            position += 1;
            index += 1;
        }

        if position == first && trailing.mode() == Mode::OneOrMore {
            return Err(self.mismatch(position, &trailing, Kind::None));
        }
        Ok(())
    }

    /// Fails with `message` unless `condition` holds. A no-op at level 0.
    pub fn check_arg(&self, position: usize, condition: bool, message: Option<&str>) -> Result<()> {
        match condition {
            true => Ok(()),
            false => self.arg_error(position, message),
        }
    }

    /// Fails unconditionally, except at level 0 where nothing is reported.
    pub fn arg_error(&self, position: usize, message: Option<&str>) -> Result<()> {
        if self.level == 0 {
            return Ok(());
        }
        Err(Error::ArgumentCondition(
            self.attribute(position, message.map(str::to_string)),
        ))
    }

    /// Fails with the mismatch `descriptor` would report for the argument at
    /// `position`, for callers that did their own matching.
    pub fn type_error(&self, position: usize, descriptor: &str) -> Result<()> {
        let descriptor = Descriptor::parse_trailing(descriptor)?;
        let value = self.caller.argument(position);
        if let (Mode::Enumerated { .. }, Some(got)) =
            (descriptor.mode(), value.as_ref().and_then(Value::as_str))
        {
            return Err(self.option_mismatch(position, &descriptor, got));
        }
        Err(self.mismatch(position, &descriptor, Kind::of(value.as_ref())))
    }

    fn fetch(&self, position: usize) -> Result<Value> {
        self.caller
            .argument(position)
            .ok_or(Error::InvalidArgumentIndex { position })
    }

    fn check_value(
        &self,
        position: usize,
        value: Option<&Value>,
        descriptor: &Descriptor,
    ) -> Result<()> {
        if let Mode::Enumerated { .. } = descriptor.mode() {
            return match option::match_option(value, descriptor) {
                OptionMatch::Accepted => Ok(()),
                OptionMatch::NotString(kind) => Err(Error::TypeMismatch(
                    self.attribute(position, Some(format::kind_mismatch("string", kind))),
                )),
                OptionMatch::Rejected(got) => Err(self.option_mismatch(position, descriptor, got)),
            };
        }
        match TypeMatcher::new(self.registry).matches_any(value, descriptor)? {
            true => Ok(()),
            false => Err(self.mismatch(position, descriptor, Kind::of(value))),
        }
    }

    fn mismatch(&self, position: usize, descriptor: &Descriptor, got: Kind) -> Error {
        debug!(position, descriptor = descriptor.source(), got = got.name(), "type mismatch");
        Error::TypeMismatch(self.attribute(position, Some(format::type_mismatch(descriptor, got))))
    }

    fn option_mismatch(&self, position: usize, descriptor: &Descriptor, got: &str) -> Error {
        debug!(position, descriptor = descriptor.source(), got, "option mismatch");
        let message = format::option_mismatch(descriptor, got);
        Error::OptionMismatch(self.attribute(position, Some(message)))
    }

    fn attribute(&self, position: usize, message: Option<String>) -> ArgError {
        ArgError {
            position,
            level: self.level,
            frame: self.caller.frame(self.level),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        caller::{Frame, FrameInfo},
        error::InvalidReason,
        value::Table,
    };
    use pretty_assertions::assert_eq;

    fn frame(args: Vec<Value>) -> Frame {
        let parameters = args.len();
        Frame::new("foo", parameters, args)
    }

    fn message(result: Result<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn check_type_accepts_any_listed_alternative() {
        let frame = frame(vec![Value::from(true)]);
        let registry = Registry::new();
        let checks = Checks::new(&frame).with_registry(&registry);
        checks.check_type(1, "a|boolean|c").unwrap();
        assert_eq!(
            message(checks.check_type(1, "a|b|c")),
            "bad argument #1 to 'foo' (a, b, or c expected, got boolean)"
        );
    }

    #[test]
    fn check_type_rejects_bad_positions_and_descriptors() {
        let frame = frame(vec![Value::from(1)]);
        let registry = Registry::new();
        let checks = Checks::new(&frame).with_registry(&registry);
        assert_eq!(
            checks.check_type(2, "number"),
            Err(Error::InvalidArgumentIndex { position: 2 })
        );
        assert_eq!(
            checks.check_type(0, "number"),
            Err(Error::InvalidArgumentIndex { position: 0 })
        );
        let Err(Error::InvalidDescriptor(error)) = checks.check_type(1, "number|") else {
            panic!("expected an invalid descriptor");
        };
        assert_eq!(error.reason, InvalidReason::EmptyAlternative);
        assert!(matches!(checks.check_type(1, "*number"), Err(Error::InvalidDescriptor(_))));
    }

    #[test]
    fn check_type_routes_option_descriptors() {
        let frame = frame(vec![Value::from("exec"), Value::from(4)]);
        let registry = Registry::new();
        let checks = Checks::new(&frame).with_registry(&registry);
        let error = checks.check_type(1, ":read|write").unwrap_err();
        assert!(matches!(error, Error::OptionMismatch(_)));
        assert_eq!(
            error.to_string(),
            "bad argument #1 to 'foo' ('read' or 'write' expected, got 'exec')"
        );
        let error = checks.check_type(2, ":read|write").unwrap_err();
        assert!(matches!(error, Error::TypeMismatch(_)));
        assert_eq!(
            error.to_string(),
            "bad argument #2 to 'foo' (string expected, got number)"
        );
    }

    #[test]
    fn check_option() {
        let frame = frame(vec![Value::from("read"), Value::from("exec"), Value::Nil]);
        let checks = Checks::new(&frame);
        checks.check_option(1, "read|write").unwrap();
        assert_eq!(
            checks
                .check_option(2, "read|write")
                .unwrap_err()
                .arg_error()
                .unwrap()
                .message
                .as_deref(),
            Some("'read' or 'write' expected, got 'exec'")
        );
        checks.check_option(3, "?read|write").unwrap();
        assert_eq!(
            message(checks.check_option(3, "read|write")),
            "bad argument #3 to 'foo' (string expected, got nil)"
        );
    }

    #[test]
    fn check_types_with_trailing_repetition() {
        let table = Value::from(Table::new());
        let registry = Registry::new();

        let ok = frame(vec![table.clone(), Value::from("x"), Value::from("y")]);
        Checks::new(&ok)
            .with_registry(&registry)
            .check_types(&["table", "*string"])
            .unwrap();

        let bad = frame(vec![table.clone(), Value::from("x"), Value::from(5)]);
        let error = Checks::new(&bad)
            .with_registry(&registry)
            .check_types(&["table", "*string"])
            .unwrap_err();
        assert_eq!(error.arg_error().unwrap().position, 3);
        assert_eq!(
            error.to_string(),
            "bad argument #3 to 'foo' (string expected, got number)"
        );
    }

    #[test]
    fn check_types_reads_variadics() {
        let registry = Registry::new();
        let args = vec![Value::from(1), Value::from(2), Value::from("three")];
        let frame = Frame::new("sum", 1, args);
        let error = Checks::new(&frame)
            .with_registry(&registry)
            .check_types(&["+number"])
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "bad argument #3 to 'sum' (number expected, got string)"
        );
    }

    #[test]
    fn one_or_more_needs_an_argument() {
        let registry = Registry::new();
        let frame = frame(vec![Value::from(Table::new())]);
        let checks = Checks::new(&frame).with_registry(&registry);
        checks.check_types(&["table", "*string"]).unwrap();
        assert_eq!(
            message(checks.check_types(&["table", "+string"])),
            "bad argument #2 to 'foo' (one or more of string expected, got no value)"
        );
    }

    #[test]
    fn check_types_missing_slots() {
        let registry = Registry::new();
        let frame = frame(vec![Value::from(1)]);
        let checks = Checks::new(&frame).with_registry(&registry);
        checks.check_types(&["number", "?table"]).unwrap();
        assert_eq!(
            message(checks.check_types(&["number", "table"])),
            "bad argument #2 to 'foo' (table expected, got no value)"
        );
        checks.check_types(&[]).unwrap();
    }

    #[test]
    fn check_types_validates_every_descriptor_first() {
        let registry = Registry::new();
        let frame = frame(vec![Value::from("wrong")]);
        let checks = Checks::new(&frame).with_registry(&registry);
        assert!(matches!(
            checks.check_types(&["number", "*a", "b"]),
            Err(Error::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn check_arg_and_levels() {
        let frame = frame(vec![Value::from(Table::new())]).called_from(FrameInfo::named("caller"));
        let checks = Checks::new(&frame);
        checks.check_arg(1, true, Some("empty table")).unwrap();
        let error = checks.check_arg(1, false, Some("empty table")).unwrap_err();
        assert!(matches!(error, Error::ArgumentCondition(_)));
        assert_eq!(error.to_string(), "bad argument #1 to 'foo' (empty table)");

        assert_eq!(
            message(checks.at_level(2).check_arg(1, false, None)),
            "bad argument #1 to 'caller'"
        );
        assert_eq!(
            message(checks.at_level(3).arg_error(1, Some("x"))),
            "bad argument #1 (x)"
        );
        checks.at_level(0).check_arg(1, false, Some("ignored")).unwrap();
        checks.at_level(0).arg_error(1, None).unwrap();
    }

    #[test]
    fn type_error_reports_without_matching() {
        let registry = Registry::new();
        let frame = frame(vec![Value::from(3), Value::from("exec")]);
        let checks = Checks::new(&frame).with_registry(&registry);
        assert_eq!(
            message(checks.type_error(1, "?table")),
            "bad argument #1 to 'foo' (nil or table expected, got number)"
        );
        assert_eq!(
            message(checks.type_error(2, ":read|write")),
            "bad argument #2 to 'foo' ('read' or 'write' expected, got 'exec')"
        );
        assert_eq!(
            message(checks.type_error(3, "table")),
            "bad argument #3 to 'foo' (table expected, got no value)"
        );
    }

    #[test]
    fn custom_checkers() {
        let registry = Registry::new();
        registry
            .register("positive", |value| matches!(value, Value::Integer(int) if *int > 0))
            .unwrap();
        let frame = frame(vec![Value::from(3), Value::from(-3)]);
        let checks = Checks::new(&frame).with_registry(&registry);
        checks.check_type(1, "positive").unwrap();
        assert_eq!(
            message(checks.check_type(2, "positive")),
            "bad argument #2 to 'foo' (positive expected, got number)"
        );
        checks.check_type(2, "!positive").unwrap();
    }
}
