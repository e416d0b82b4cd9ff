use std::fmt;

use thiserror::Error;

use crate::caller::FrameInfo;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidDescriptor(#[from] DescriptorError),
    #[error("invalid argument index #{position}")]
    InvalidArgumentIndex { position: usize },
    #[error("{0}")]
    TypeMismatch(ArgError),
    #[error("{0}")]
    OptionMismatch(ArgError),
    #[error("{0}")]
    ArgumentCondition(ArgError),
    #[error("type '{name}' already registered")]
    AlreadyRegistered { name: String },
    #[error("checker name is empty")]
    EmptyCheckerName,
    #[error("{message}")]
    Runtime { message: String },
}

impl Error {
    /// Failure raised by host code itself rather than by a check.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// The attributed argument error, for the variants that carry one.
    pub fn arg_error(&self) -> Option<&ArgError> {
        match self {
            Error::TypeMismatch(error)
            | Error::OptionMismatch(error)
            | Error::ArgumentCondition(error) => Some(error),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid descriptor '{descriptor}': {reason}")]
pub struct DescriptorError {
    pub descriptor: String,
    pub reason: InvalidReason,
}

impl DescriptorError {
    pub fn new(descriptor: &str, reason: InvalidReason) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("empty descriptor")]
    Empty,
    #[error("empty alternative")]
    EmptyAlternative,
    #[error("nothing follows prefix '{0}'")]
    MissingAlternatives(char),
    #[error("prefixes '{0}' and '{1}' cannot be combined")]
    ConflictingPrefixes(char, char),
    #[error("prefix '{0}' is only allowed on the last descriptor of a variadic check")]
    MisplacedVariadic(char),
}

/// An error attributed to one argument of a call frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgError {
    /// 1-based, as the caller sees it (self included for method calls).
    pub position: usize,
    pub level: usize,
    /// Frame `level` up, when the host could resolve it.
    pub frame: Option<FrameInfo>,
    pub message: Option<String>,
}

impl ArgError {
    pub fn function_name(&self) -> &str {
        self.frame
            .as_ref()
            .and_then(|frame| frame.name.as_deref())
            .unwrap_or("?")
    }
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.frame {
            None => write!(f, "bad argument #{}", self.position)?,
            Some(frame) => {
                if let Some(location) = &frame.location {
                    write!(f, "{location}: ")?;
                }
                let name = self.function_name();
                match (frame.method, self.position) {
                    (true, 1) => write!(f, "calling '{name}' on bad self")?,
                    (true, position) => {
                        write!(f, "bad argument #{} to '{name}'", position.saturating_sub(1))?
                    }
                    (false, position) => write!(f, "bad argument #{position} to '{name}'")?,
                }
            }
        }
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! runtime_error {
    ($($arg: tt)*) => {
        $crate::error::Error::new(format!($($arg)*))
    };
}
