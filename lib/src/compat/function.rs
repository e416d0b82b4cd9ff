use std::{borrow::Cow, marker::PhantomData, rc::Rc};
use variadics_please::all_tuples;

use super::arg_type::ArgType;
use crate::{
    caller::Frame,
    checks::Checks,
    error::Result,
    value::{Call, Value},
};

/// A Rust function callable from the host.
pub struct RsFunction<Fn, Marker> {
    name: String,
    function: Fn,
    descriptors: Vec<Cow<'static, str>>,
    phantom: PhantomData<Marker>,
}

impl<Fn, Marker> RsFunction<Fn, Marker> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One descriptor per parameter, in order.
    pub fn descriptors(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(AsRef::as_ref)
    }
}

pub trait IntoCallable<Marker>: Sized {
    /// Wraps the function under `name`, the name argument errors report.
    fn into_callable(self, name: &str) -> RsFunction<Self, Marker>;
}

macro_rules! impl_fn {
    ($(($generic: ident, $var: ident)),*) => {
        impl<
            T: Fn($($generic),*) -> Result<R>,
            R: Into<Value>,
            $($generic: ArgType),*
        > Call for RsFunction<T, (R, $($generic),*)> {
            #[allow(unused)]
            fn call(&self, args: Vec<Value>) -> Result<Value> {
                let frame = Frame::new(self.name.as_str(), self.descriptors.len(), args);
                let descriptors: Vec<&str> = self.descriptors().collect();
                Checks::new(&frame).check_types(&descriptors)?;

                let mut iter = frame.into_parameters().into_iter();
                $(
                    let $var = $generic::from_value(iter.next().unwrap_or(Value::Nil))?;
                )*
                (self.function)($($var),*).map(Into::into)
            }
        }

        impl<
            T: Fn($($generic),*) -> Result<R>,
            R: Into<Value>,
            $($generic: ArgType),*
        > IntoCallable<(R, $($generic),*)> for T {
            fn into_callable(self, name: &str) -> RsFunction<T, (R, $($generic),*)> {
                RsFunction {
                    name: name.to_string(),
                    function: self,
                    descriptors: vec![$($generic::descriptor()),*],
                    phantom: PhantomData,
                }
            }
        }

        impl<
            T: Fn($($generic),*) -> Result<R> + 'static,
            R: Into<Value> + 'static,
            $($generic: ArgType + 'static),*
        > From<RsFunction<T, (R, $($generic),*)>> for Value {
            fn from(function: RsFunction<T, (R, $($generic),*)>) -> Value {
                Value::Function(Rc::new(function))
            }
        }
    };
}

all_tuples!(impl_fn, 0, 16, A, a);
