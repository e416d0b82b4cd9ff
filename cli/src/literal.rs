//! Command-line spelling of host values.
//!
//! `nil`, `true`, `false`, integers and floats read as themselves; `{}` and
//! `{Type}` are tables, `<>` and `<Name>` userdata (`<FILE*>` is a file
//! handle), `fn` a function and `co` a thread. Quoted text is a string, and
//! so is anything else.

use std::rc::Rc;

use lib::{
    error::Result,
    value::{Call, Table, Thread, Userdata, Value, metakeys},
};

struct Noop;

impl Call for Noop {
    fn call(&self, _: Vec<Value>) -> Result<Value> {
        Ok(Value::Nil)
    }
}

pub fn parse(text: &str) -> Value {
    match text {
        "nil" => return Value::Nil,
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        "fn" => return Value::Function(Rc::new(Noop)),
        "co" => return Value::from(Thread::default()),
        _ => (),
    }
    if let Some(name) = delimited(text, '{', '}') {
        return Value::from(match name {
            "" => Table::new(),
            name => Table::typed(name),
        });
    }
    if let Some(name) = delimited(text, '<', '>') {
        return Value::from(match name {
            "" => Userdata::new(()),
            name => Userdata::named(name, ()),
        });
    }
    if let Some(string) = delimited(text, '\'', '\'').or_else(|| delimited(text, '"', '"')) {
        return Value::from(string);
    }
    if let Ok(int) = text.parse::<i64>() {
        return Value::Integer(int);
    }
    match text.parse::<f64>() {
        Ok(float) => Value::Float(float),
        Err(_) => Value::from(text),
    }
}

pub fn render(value: &Value) -> String {
    match value {
        Value::Nil => String::from("nil"),
        Value::Boolean(boolean) => boolean.to_string(),
        Value::Integer(int) => int.to_string(),
        Value::Float(float) => format!("{float:?}"),
        Value::String(string) => string.to_string(),
        Value::Table(table) => {
            format!("{{{}}}", table.meta_str(metakeys::TYPE_NAME).unwrap_or(""))
        }
        Value::Userdata(userdata) => format!("<{}>", userdata.name().unwrap_or("")),
        Value::Function(_) => String::from("fn"),
        Value::Thread(_) => String::from("co"),
    }
}

fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    text.strip_prefix(open)?.strip_suffix(close)
}
