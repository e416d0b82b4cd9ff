use crate::value::Value;

/// Call-frame metadata used to attribute an argument error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub name: Option<String>,
    /// Source position of the call, e.g. `main.lua:12`.
    pub location: Option<String>,
    /// The call passed its receiver as an implicit first argument.
    pub method: bool,
}

impl FrameInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// What the host exposes about the call being validated.
///
/// Positions and indices are 1-based. Levels count frames upwards from the
/// function whose arguments are checked, which is level 1.
pub trait CallerContext {
    /// The named parameter slot at `position`. `None` when the frame has no
    /// such slot; an unset parameter is `Some(Value::Nil)`.
    fn argument(&self, position: usize) -> Option<Value>;

    /// The `index`th trailing unnamed argument.
    fn variadic(&self, index: usize) -> Option<Value>;

    fn frame(&self, level: usize) -> Option<FrameInfo>;

    fn current_function_name(&self) -> Option<String> {
        self.frame(1).and_then(|frame| frame.name)
    }
}

impl<C: CallerContext + ?Sized> CallerContext for &C {
    fn argument(&self, position: usize) -> Option<Value> {
        (**self).argument(position)
    }
    fn variadic(&self, index: usize) -> Option<Value> {
        (**self).variadic(index)
    }
    fn frame(&self, level: usize) -> Option<FrameInfo> {
        (**self).frame(level)
    }
}

/// A materialised call frame: the declared parameters, the extra arguments
/// and the frames above it.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    info: FrameInfo,
    parameters: Vec<Value>,
    varargs: Vec<Value>,
    callers: Vec<FrameInfo>,
}

impl Frame {
    /// Binds `args` to `parameters` slots the way a call does: missing
    /// arguments read as nil, extra ones become variadics.
    pub fn new(name: impl Into<String>, parameters: usize, args: Vec<Value>) -> Self {
        Self::with_info(FrameInfo::named(name), parameters, args)
    }

    pub fn with_info(info: FrameInfo, parameters: usize, mut args: Vec<Value>) -> Self {
        let varargs = match args.len() > parameters {
            true => args.split_off(parameters),
            false => Vec::new(),
        };
        args.resize(parameters, Value::Nil);
        Self {
            info,
            parameters: args,
            varargs,
            callers: Vec::new(),
        }
    }

    pub fn located(mut self, location: impl Into<String>) -> Self {
        self.info.location = Some(location.into());
        self
    }

    pub fn method(mut self) -> Self {
        self.info.method = true;
        self
    }

    /// Pushes the next frame up the stack (level 2, then 3, and so on).
    pub fn called_from(mut self, caller: FrameInfo) -> Self {
        self.callers.push(caller);
        self
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }
    pub fn varargs(&self) -> &[Value] {
        &self.varargs
    }

    pub fn into_parameters(self) -> Vec<Value> {
        self.parameters
    }
}

impl CallerContext for Frame {
    fn argument(&self, position: usize) -> Option<Value> {
        self.parameters.get(position.checked_sub(1)?).cloned()
    }

    fn variadic(&self, index: usize) -> Option<Value> {
        self.varargs.get(index.checked_sub(1)?).cloned()
    }

    fn frame(&self, level: usize) -> Option<FrameInfo> {
        match level {
            0 => None,
            1 => Some(self.info.clone()),
            level => self.callers.get(level - 2).cloned(),
        }
    }
}
