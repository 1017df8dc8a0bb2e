use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope.
///
/// Scopes are kept alive by the evaluator frame that created them and by
/// every `Function` value that captured them.
pub type Env = Rc<RefCell<Environment>>;

/// A name-to-value scope, optionally chained to an enclosing scope.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    /// A fresh root scope with no outer link.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// A fresh, empty scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: Env) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Wraps this scope in a shared handle.
    pub fn into_shared(self) -> Env {
        Rc::new(RefCell::new(self))
    }

    /// Looks `name` up here, then along the chain of outer scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.store.get(name) {
            Some(value.clone())
        } else if let Some(outer) = &self.outer {
            outer.borrow().get(name)
        } else {
            None
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding, and
    /// returns the stored value.
    pub fn set(&mut self, name: &str, value: Value) -> Value {
        debug!("Binding '{}' to {}", name, value);

        self.store.insert(name.to_string(), value.clone());

        value
    }

    pub fn outer(&self) -> Option<&Env> {
        self.outer.as_ref()
    }
}

impl std::fmt::Debug for Environment {
    // Bindings may hold closures that point back at this scope, so only the
    // names are printed.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.store.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}
