use lib::{Registry, Value, error::Result};

/// Demo type names available to every descriptor the CLI checks.
pub fn register(registry: &Registry) -> Result<()> {
    registry.register("positive", |value| match value {
        Value::Integer(int) => *int > 0,
        Value::Float(float) => *float > 0.0,
        _ => false,
    })?;
    registry.register("nonempty", |value| match value {
        Value::String(string) => !string.is_empty(),
        Value::Table(table) => !table.is_empty(),
        _ => false,
    })?;
    registry.register("char", |value| {
        value
            .as_str()
            .is_some_and(|string| string.chars().count() == 1)
    })?;
    Ok(())
}
