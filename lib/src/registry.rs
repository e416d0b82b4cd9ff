//! Custom checkers, keyed by the type name they extend the matcher with.

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::{Arc, LazyLock},
};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    value::Value,
};

pub type Checker = Arc<dyn Fn(&Value) -> Result<bool> + Send + Sync>;

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);

#[derive(Default)]
pub struct Registry {
    checkers: RwLock<HashMap<String, Checker>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let checkers = self.checkers.read();
        let mut names: Vec<_> = checkers.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("checkers", &names).finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use and never dropped.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn register<F>(&self, name: impl Into<String>, predicate: F) -> Result<()>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.register_fallible(name, move |value| Ok(predicate(value)))
    }

    /// Registers a predicate that may itself fail; its error aborts the
    /// check that invoked it.
    pub fn register_fallible<F>(&self, name: impl Into<String>, predicate: F) -> Result<()>
    where
        F: Fn(&Value) -> Result<bool> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyCheckerName);
        }
        match self.checkers.write().entry(name) {
            Entry::Occupied(entry) => Err(Error::AlreadyRegistered {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(name = %entry.key(), "registered checker");
                entry.insert(Arc::new(predicate));
                Ok(())
            }
        }
    }

    /// Removes a checker. Unknown names are ignored.
    pub fn unregister(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyCheckerName);
        }
        if self.checkers.write().remove(name).is_some() {
            debug!(name, "unregistered checker");
        }
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.checkers.read().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Checker> {
        self.checkers.read().get(name).cloned()
    }

    /// Runs the checker registered under `name`, `None` when there is none.
    ///
    /// The lock is released before the predicate runs, so predicates may use
    /// the registry themselves.
    pub fn check(&self, name: &str, value: &Value) -> Result<Option<bool>> {
        let Some(checker) = self.get(name) else {
            return Ok(None);
        };
        let accepted = checker(value)?;
        trace!(name, accepted, "ran checker");
        Ok(Some(accepted))
    }

    pub fn len(&self) -> usize {
        self.checkers.read().len()
    }
    pub fn is_empty(&self) -> bool {
        self.checkers.read().is_empty()
    }

    /// Drops every checker.
    pub fn clear(&self) {
        self.checkers.write().clear();
    }
}
