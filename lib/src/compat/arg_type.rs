use std::{borrow::Cow, rc::Rc};

use crate::{
    error::Result,
    runtime_error,
    value::{Table, Value},
};

/// A parameter type a native function can receive.
pub trait ArgType: Sized {
    /// Descriptor the argument is validated against before conversion.
    fn descriptor() -> Cow<'static, str>;

    /// Conversion from a value that already satisfied [`descriptor`](Self::descriptor).
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_arg_type {
    ($($type: ty = $descriptor: literal, $pattern: pat => $convert: expr),* $(,)?) => {
        $(
            impl ArgType for $type {
                fn descriptor() -> Cow<'static, str> {
                    Cow::Borrowed($descriptor)
                }
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        $pattern => Ok($convert),
                        value => Err(runtime_error!(
                            "cannot convert {} to {}",
                            value.type_name(),
                            $descriptor
                        )),
                    }
                }
            }
        )*
    };
}

impl_arg_type!(
    String = "string", Value::String(string) => string.to_string(),
    Rc<str> = "string", Value::String(string) => string,
    i64 = "integer", Value::Integer(int) => int,
    bool = "boolean", Value::Boolean(boolean) => boolean,
    Rc<Table> = "table", Value::Table(table) => table,
);

impl ArgType for f64 {
    fn descriptor() -> Cow<'static, str> {
        Cow::Borrowed("number")
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(float) => Ok(float),
            Value::Integer(int) => Ok(int as f64),
            value => Err(runtime_error!("cannot convert {} to number", value.type_name())),
        }
    }
}

impl ArgType for Value {
    fn descriptor() -> Cow<'static, str> {
        Cow::Borrowed("?any")
    }
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: ArgType> ArgType for Option<T> {
    fn descriptor() -> Cow<'static, str> {
        let inner = T::descriptor();
        match inner.strip_prefix('?') {
            Some(_) => inner,
            None => Cow::Owned(format!("?{inner}")),
        }
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}
