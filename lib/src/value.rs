use crate::error::Result;
use std::{
    any::Any,
    borrow::Cow,
    cell::RefCell,
    collections::HashMap,
    fmt::{self, Debug},
    rc::Rc,
};

/// Metatable fields consulted when resolving a specific type name.
pub mod metakeys {
    /// Set by producers of structured values (tables).
    pub const TYPE_NAME: &str = "__type";
    /// Set by producers of opaque handles (userdata).
    pub const USERDATA_NAME: &str = "__name";
}

/// `__name` carried by the host's file handles.
pub const FILE_HANDLE: &str = "FILE*";

pub type Metatable = HashMap<String, Value>;

#[derive(Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Rc<str>),

    Table(Rc<Table>),
    Userdata(Rc<Userdata>),
    Function(Rc<dyn Call>),
    Thread(Rc<Thread>),
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "Nil"),
            Self::Boolean(arg0) => f.debug_tuple("Boolean").field(arg0).finish(),
            Self::Integer(arg0) => f.debug_tuple("Integer").field(arg0).finish(),
            Self::Float(arg0) => f.debug_tuple("Float").field(arg0).finish(),
            Self::String(arg0) => f.debug_tuple("String").field(arg0).finish(),
            Self::Table(arg0) => f.debug_tuple("Table").field(arg0).finish(),
            Self::Userdata(arg0) => f.debug_tuple("Userdata").field(arg0).finish(),
            Self::Function(_) => f.debug_tuple("Function").finish(),
            Self::Thread(arg0) => f.debug_tuple("Thread").field(arg0).finish(),
        }
    }
}

/// Runtime category of a value, including the absent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Nil,
    Boolean,
    Integer,
    Float,
    String,
    Table,
    Userdata,
    File,
    Function,
    Thread,
}

impl Kind {
    pub fn of(value: Option<&Value>) -> Self {
        value.map_or(Kind::None, Value::kind)
    }

    /// Host-facing name, as used in diagnostics. Numbers and handles collapse
    /// into their coarse category.
    pub fn name(self) -> &'static str {
        match self {
            Kind::None => "no value",
            Kind::Nil => "nil",
            Kind::Boolean => "boolean",
            Kind::Integer | Kind::Float => "number",
            Kind::String => "string",
            Kind::Table => "table",
            Kind::Userdata | Kind::File => "userdata",
            Kind::Function => "function",
            Kind::Thread => "thread",
        }
    }

    pub fn is_nil(self) -> bool {
        matches!(self, Kind::Nil | Kind::None)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Table(_) => Kind::Table,
            Value::Userdata(userdata) if userdata.is_file() => Kind::File,
            Value::Userdata(_) => Kind::Userdata,
            Value::Function(_) => Kind::Function,
            Value::Thread(_) => Kind::Thread,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Finer-grained name: `integer`/`float` for numbers, the metatable tag
    /// for tables and userdata, the coarse name otherwise.
    pub fn specific_type(&self) -> Cow<'_, str> {
        let tagged = match self {
            Value::Integer(_) => return Cow::Borrowed("integer"),
            Value::Float(_) => return Cow::Borrowed("float"),
            Value::Table(table) => table.meta_str(metakeys::TYPE_NAME),
            Value::Userdata(userdata) => userdata.name(),
            _ => None,
        };
        match tagged {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Borrowed(self.type_name()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Userdata(a), Value::Userdata(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Thread(a), Value::Thread(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

pub trait Call {
    fn call(&self, args: Vec<Value>) -> Result<Value>;
}

/// String-keyed structured value with an optional metatable.
#[derive(Debug, Default)]
pub struct Table {
    entries: RefCell<HashMap<String, Value>>,
    metatable: Option<Metatable>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table whose metatable declares `__type = name`.
    pub fn typed(name: &str) -> Self {
        let mut metatable = Metatable::new();
        metatable.insert(metakeys::TYPE_NAME.to_string(), Value::from(name));
        Self::with_metatable(metatable)
    }

    pub fn with_metatable(metatable: Metatable) -> Self {
        Self {
            entries: RefCell::default(),
            metatable: Some(metatable),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Metatable field, only when it holds a string.
    pub fn meta_str(&self, field: &str) -> Option<&str> {
        meta_str(self.metatable.as_ref(), field)
    }
}

/// Opaque host handle.
pub struct Userdata {
    data: Box<dyn Any>,
    metatable: Option<Metatable>,
}

impl Userdata {
    pub fn new(data: impl Any) -> Self {
        Self {
            data: Box::new(data),
            metatable: None,
        }
    }

    /// Userdata whose metatable declares `__name = name`.
    pub fn named(name: &str, data: impl Any) -> Self {
        let mut metatable = Metatable::new();
        metatable.insert(metakeys::USERDATA_NAME.to_string(), Value::from(name));
        Self {
            data: Box::new(data),
            metatable: Some(metatable),
        }
    }

    pub fn file(data: impl Any) -> Self {
        Self::named(FILE_HANDLE, data)
    }

    pub fn name(&self) -> Option<&str> {
        meta_str(self.metatable.as_ref(), metakeys::USERDATA_NAME)
    }

    pub fn is_file(&self) -> bool {
        self.name() == Some(FILE_HANDLE)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }
}

impl Debug for Userdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Userdata")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Coroutine handle. The checks only ever look at its kind.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Thread;

fn meta_str<'a>(metatable: Option<&'a Metatable>, field: &str) -> Option<&'a str> {
    metatable?.get(field)?.as_str()
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}
impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}
impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}
impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Nil
    }
}
impl From<Table> for Value {
    fn from(table: Table) -> Self {
        Self::Table(Rc::new(table))
    }
}
impl From<Rc<Table>> for Value {
    fn from(table: Rc<Table>) -> Self {
        Self::Table(table)
    }
}
impl From<Userdata> for Value {
    fn from(userdata: Userdata) -> Self {
        Self::Userdata(Rc::new(userdata))
    }
}
impl From<Thread> for Value {
    fn from(thread: Thread) -> Self {
        Self::Thread(Rc::new(thread))
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Nil, Into::into)
    }
}
