use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Environments are shared: methods keep the scope they were defined in
/// alive, and every reader of a binding sees its latest value. The chain of
/// `outer` references forms a tree rooted at the session scope.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn with_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: Default::default(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Walks the scope chain outward until the name resolves.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Writes always land in the innermost scope.
    pub fn set(&mut self, name: &str, val: Object) {
        self.store.insert(name.to_owned(), val);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let env = Environment::new();
        env.borrow_mut().set("a", Object::Integer(5));

        assert_eq!(env.borrow().get("a"), Some(Object::Integer(5)));
        assert_eq!(env.borrow().get("b"), None);
    }

    #[test]
    fn test_lookup_walks_outer_chain() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::Integer(1));

        let inner = Environment::with_enclosed(&outer);
        assert_eq!(inner.borrow().get("a"), Some(Object::Integer(1)));
    }

    #[test]
    fn test_inner_set_shadows_without_touching_outer() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::Integer(1));

        let inner = Environment::with_enclosed(&outer);
        inner.borrow_mut().set("a", Object::Integer(2));

        assert_eq!(inner.borrow().get("a"), Some(Object::Integer(2)));
        assert_eq!(outer.borrow().get("a"), Some(Object::Integer(1)));
    }

    #[test]
    fn test_later_outer_writes_are_visible() {
        let outer = Environment::new();
        let inner = Environment::with_enclosed(&outer);

        outer.borrow_mut().set("a", Object::Integer(10));
        assert_eq!(inner.borrow().get("a"), Some(Object::Integer(10)));
    }
}
