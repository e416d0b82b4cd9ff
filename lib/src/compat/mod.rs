//! Exposing Rust functions to the host with their arguments checked.
//!
//! Each parameter type declares a descriptor through [`ArgType`]; the
//! adapter validates the whole call with those descriptors before any
//! conversion happens, so native functions report the same diagnostics as
//! explicit checks.

pub mod arg_type;
pub mod function;

pub use arg_type::ArgType;
pub use function::{IntoCallable, RsFunction};
