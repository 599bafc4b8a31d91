//! Named build variables for the downstream substitution system.
//!
//! A variable is either a plain string computed eagerly, or a deferred
//! zero-argument thunk evaluated at most once on first read and cached for
//! the rest of the process. Deferred variables may be read concurrently from
//! build-graph workers; `OnceLock` guarantees that racing first reads agree
//! on a single evaluation.

use std::collections::BTreeMap;
use std::sync::OnceLock;

type Thunk = Box<dyn Fn() -> String + Send + Sync>;

enum Variable {
    Static(String),
    Deferred { cell: OnceLock<String>, thunk: Thunk },
}

/// Registry of named, string-valued build variables.
#[derive(Default)]
pub struct VariableRegistry {
    vars: BTreeMap<String, Variable>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        VariableRegistry::default()
    }

    /// Define an eagerly computed variable.
    ///
    /// Panics on a duplicate name; variable names are a fixed, code-owned
    /// namespace and a collision is a programming error.
    pub fn define_static(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), Variable::Static(value.into()));
    }

    /// Define a lazily computed variable. The thunk runs at most once, on
    /// the first `value()` call, and its result is cached.
    pub fn define_deferred<F>(&mut self, name: impl Into<String>, thunk: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.insert(
            name.into(),
            Variable::Deferred {
                cell: OnceLock::new(),
                thunk: Box::new(thunk),
            },
        );
    }

    /// Look up a variable, forcing deferred evaluation if needed.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.vars.get(name)? {
            Variable::Static(value) => Some(value.as_str()),
            Variable::Deferred { cell, thunk } => Some(cell.get_or_init(thunk).as_str()),
        }
    }

    /// All defined variable names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Number of defined variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn insert(&mut self, name: String, var: Variable) {
        let duplicate = self.vars.insert(name.clone(), var).is_some();
        assert!(!duplicate, "duplicate variable definition: {}", name);
    }
}

impl std::fmt::Debug for VariableRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, var) in &self.vars {
            match var {
                Variable::Static(value) => map.entry(name, value),
                Variable::Deferred { cell, .. } => match cell.get() {
                    Some(value) => map.entry(name, value),
                    None => map.entry(name, &"<deferred>"),
                },
            };
        }
        map.finish()
    }
}
