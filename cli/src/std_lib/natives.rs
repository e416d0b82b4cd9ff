use lib::{
    compat::IntoCallable,
    error::{Error, Result},
    value::{Table, Value},
};

/// Native functions reachable through `argcheck call`.
pub fn prelude() -> Table {
    let table = Table::new();
    table.set("type_of", type_of.into_callable("type_of"));
    table.set("repeat", repeat.into_callable("repeat"));
    table.set("clamp", clamp.into_callable("clamp"));
    table
}

pub fn type_of(value: Value) -> Result<String> {
    Ok(value.specific_type().into_owned())
}

pub fn repeat(text: String, times: Option<i64>) -> Result<String> {
    let times = times.unwrap_or(1);
    let times = usize::try_from(times)
        .map_err(|_| Error::new(format!("cannot repeat a string {times} times")))?;
    Ok(text.repeat(times))
}

pub fn clamp(value: f64, low: f64, high: f64) -> Result<f64> {
    if low > high {
        return Err(Error::new(format!("empty range {low}..{high}")));
    }
    Ok(value.clamp(low, high))
}
