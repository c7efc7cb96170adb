use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Scope {
    store: HashMap<String, Object>,
    outer: Option<Environment>,
}

/// A handle to one scope in a chain of scopes. Cloning the handle shares the
/// scope, which is how closures keep their defining scope alive.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_enclosed(outer: &Environment) -> Self {
        Self(Rc::new(RefCell::new(Scope {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        })))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.0.borrow();
        match scope.store.get(name) {
            Some(value) => Some(value.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds in this scope only, shadowing any outer binding.
    pub fn set(&self, name: &str, val: Object) {
        self.0.borrow_mut().store.insert(name.to_owned(), val);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Scopes can reach themselves through the closures they hold, so only the
// local names are printed.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &scope.outer.is_some())
            .finish()
    }
}
