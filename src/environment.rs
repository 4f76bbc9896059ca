use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// A mapping from identifier name to value. Enclosed environments chain to
/// their outer scope: lookup walks inner to outer, definition always lands
/// in the innermost.
#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Environment {
        Environment::default()
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Environment {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut env = Environment::new();
        env.set("x", Object::Integer(5));
        assert_eq!(env.get("x"), Some(Object::Integer(5)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn lookup_walks_the_outer_chain() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().set("x", Object::Integer(1));

        let inner = Environment::new_enclosed(Rc::clone(&outer));
        assert_eq!(inner.get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn inner_definitions_shadow_outer_ones() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer.borrow_mut().set("x", Object::Integer(1));

        let mut inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.set("x", Object::Integer(2));

        assert_eq!(inner.get("x"), Some(Object::Integer(2)));
        assert_eq!(outer.borrow().get("x"), Some(Object::Integer(1)));
    }
}
