// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::RuntimeError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Defines a binding in THIS scope (doesn't walk parent chain)
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Looks up a symbol in THIS scope and parent scopes recursively
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }

        if let Some(ref parent) = self.parent {
            return parent.get(name);
        }

        None
    }

    /// Updates an existing binding in the nearest enclosing scope that
    /// defines `name`; undefined names are a runtime error (spec 4.4).
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }

        if let Some(ref parent) = self.parent {
            return parent.assign(name, value);
        }

        Err(RuntimeError::UndefinedAssignTarget(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.define("x".to_string(), Value::Integer(42));

        match env.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 42),
            other => panic!("expected Integer(42), got {:?}", other),
        }
    }

    #[test]
    fn undefined_symbol_is_none() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(42));

        let child = Environment::with_parent(parent);
        child.define("x".to_string(), Value::Integer(100));

        match child.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 100),
            other => panic!("expected Integer(100), got {:?}", other),
        }
    }

    #[test]
    fn child_sees_parent_binding() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(42));
        let child = Environment::with_parent(parent);

        match child.get("x") {
            Some(Value::Integer(n)) => assert_eq!(n, 42),
            other => panic!("expected Integer(42), got {:?}", other),
        }
    }

    #[test]
    fn assign_walks_chain_to_defining_scope() {
        let parent = Environment::new();
        parent.define("x".to_string(), Value::Integer(1));
        let child = Environment::with_parent(parent.clone());

        child.assign("x", Value::Integer(2)).unwrap();

        assert_eq!(parent.get("x"), Some(Value::Integer(2)));
    }

    #[test]
    fn assign_to_undefined_name_errors() {
        let env = Environment::new();
        let err = env.assign("missing", Value::Nil).unwrap_err();
        assert_eq!(err, RuntimeError::UndefinedAssignTarget("missing".into()));
    }
}
