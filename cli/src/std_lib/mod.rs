use std::rc::Rc;

use lib::{Registry, error::Result, value::Table};

pub mod checkers;
pub mod natives;

thread_local!(pub static PRELUDE: Rc<Table> = Rc::new(natives::prelude()));

pub fn init_registry() -> Result<()> {
    checkers::register(Registry::global())
}
