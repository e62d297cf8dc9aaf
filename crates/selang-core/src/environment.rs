//! Variable storage for a run.

use std::collections::HashMap;
use std::sync::Arc;

use crate::runtime::Value;

/// A mutable name-to-value frame.
///
/// The optional parent is consulted only when a lookup misses locally; it is
/// never written through. Every statement of a program runs against the one
/// root frame, so in practice the parent chain is empty.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
    parent: Option<Arc<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: Arc<Environment>) -> Self {
        Self {
            variables: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Creates or overwrites `name` in this frame.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Looks `name` up in this frame, then in the parent chain.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.variables.get(name) {
            Some(value) => Some(value),
            None => self.parent.as_deref().and_then(|p| p.get(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Bindings of this frame only, excluding the parent chain.
    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut env = Environment::new();
        env.set("foo", Value::Number(10.0));
        assert_eq!(env.get("foo"), Some(&Value::Number(10.0)));
        assert_eq!(env.get("bar"), None);
    }

    #[test]
    fn set_overwrites() {
        let mut env = Environment::new();
        env.set("foo", Value::Number(1.0));
        env.set("foo", Value::Text("one".to_string()));
        assert_eq!(env.get("foo"), Some(&Value::Text("one".to_string())));
        assert_eq!(env.variables().len(), 1);
    }

    #[test]
    fn falsy_values_are_still_found() {
        let mut env = Environment::new();
        env.set("zero", Value::Number(0.0));
        env.set("no", Value::Bool(false));
        assert!(env.contains("zero"));
        assert!(env.contains("no"));
    }

    #[test]
    fn lookup_falls_back_to_parent_without_writing_it() {
        let mut root = Environment::new();
        root.set("x", Value::Number(1.0));
        let root = Arc::new(root);

        let mut child = Environment::with_parent(root.clone());
        assert_eq!(child.get("x"), Some(&Value::Number(1.0)));

        child.set("x", Value::Number(2.0));
        assert_eq!(child.get("x"), Some(&Value::Number(2.0)));
        assert_eq!(root.get("x"), Some(&Value::Number(1.0)));
    }
}
