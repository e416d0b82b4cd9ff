//! Argument validation for native functions of a dynamically typed host.
//!
//! Arguments are checked against compact descriptors such as `?table`,
//! `integer|string`, `!nil` or `:read|write`, and mismatches come back as
//! errors worded the way the host reports bad arguments:
//!
//! ```text
//! bad argument #2 to 'insert' (nil, table, or string expected, got number)
//! ```
//!
//! The host supplies argument values and call-frame metadata through
//! [`caller::CallerContext`]; [`checks::Checks`] runs the validation.

pub mod caller;
pub mod checks;
pub mod compat;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod matcher;
pub mod option;
pub mod registry;
pub mod value;

pub use caller::{CallerContext, Frame, FrameInfo};
pub use checks::Checks;
pub use error::{Error, Result};
pub use registry::Registry;
pub use value::{Kind, Value};
