//! # Lexical Environments
//!
//! An environment is a chain of frames. Each frame owns its bindings and points
//! at the frame that encloses it; the global frame points at nothing.
//!
//! Frames are shared, mutable, and reference counted. The call that created a
//! frame, every closure created inside it, and every child frame hold the same
//! handle, so a `set!` through any of them is immediately visible to all the
//! others. Evaluation is single threaded, so `RefCell` is enough.
//!
//! ```
//! use scheem::runtime::{Environment, Value};
//!
//! let global = Environment::new();
//! global.define("x", Value::from(10.0));
//!
//! let call = global.extend(["y".to_string()], vec![Value::from(20.0)], "f").unwrap();
//! assert_eq!(call.lookup("x").unwrap(), Value::from(10.0));
//!
//! call.assign("x", Value::from(11.0)).unwrap();
//! assert_eq!(global.lookup("x").unwrap(), Value::from(11.0));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::HashMap;

use crate::atoms;
use crate::errors::{Arity, EvalError};
use crate::runtime::value::Value;

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A shared handle to the innermost frame of a scope chain.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Creates a global frame with the full primitive library already bound.
    pub fn new() -> Self {
        let env = Self::bare();
        atoms::register_all_atoms(&env);
        env
    }

    /// Creates a global frame seeded with `bindings`, layered over the
    /// primitive library. A caller binding that shares a primitive's name wins.
    pub fn with_bindings<I, K>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let env = Self::new();
        for (name, value) in bindings {
            env.define(name, value);
        }
        env
    }

    /// A global frame with nothing bound, not even primitives.
    pub(crate) fn bare() -> Self {
        Self::from_frame(HashMap::new(), None)
    }

    fn from_frame(bindings: HashMap<String, Value>, parent: Option<Environment>) -> Self {
        Environment(Rc::new(RefCell::new(Frame { bindings, parent })))
    }

    /// Binds every primitive whose name is missing from the global frame.
    /// Existing bindings are left alone, so calling this again is a no-op.
    pub fn ensure_primitives(&self) {
        let global = self.global();
        for primitive in atoms::PRIMITIVES {
            if !global.is_bound_locally(primitive.name) {
                global.define(primitive.name, Value::Primitive(*primitive));
            }
        }
    }

    /// Builds a new innermost frame over `self` binding `names[i]` to
    /// `values[i]`. The counts must match exactly.
    pub fn extend(
        &self,
        names: impl IntoIterator<Item = String>,
        values: Vec<Value>,
        callee: &str,
    ) -> Result<Environment, EvalError> {
        let names: Vec<String> = names.into_iter().collect();
        if names.len() != values.len() {
            return Err(EvalError::arity(
                callee,
                Arity::Exactly(names.len()),
                values.len(),
            ));
        }
        let bindings: HashMap<String, Value> = names.into_iter().zip(values).collect();
        Ok(Self::from_frame(bindings, Some(self.clone())))
    }

    // ------------------------------------------------------------------------
    // Binding operations
    // ------------------------------------------------------------------------

    /// Resolves `name`, searching this frame first and then each enclosing
    /// frame outward.
    pub fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        let mut current = self.clone();
        loop {
            let next = {
                let frame = current.0.borrow();
                if let Some(value) = frame.bindings.get(name) {
                    return Ok(value.clone());
                }
                frame.parent.clone()
            };
            match next {
                Some(parent) => current = parent,
                None => return Err(EvalError::unbound(name)),
            }
        }
    }

    /// Binds or overwrites `name` in this frame only.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Mutates the nearest existing binding of `name`. Never creates one.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), EvalError> {
        let mut current = self.clone();
        loop {
            let next = {
                let mut frame = current.0.borrow_mut();
                if let Some(slot) = frame.bindings.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                frame.parent.clone()
            };
            match next {
                Some(parent) => current = parent,
                None => return Err(EvalError::unbound(name)),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    pub fn is_global(&self) -> bool {
        self.0.borrow().parent.is_none()
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// The outermost frame of this chain.
    pub fn global(&self) -> Environment {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Number of frames from here to the global frame, inclusive.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self.parent();
        while let Some(env) = current {
            depth += 1;
            current = env.parent();
        }
        depth
    }

    pub fn is_bound_locally(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Names bound in this frame, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort();
        names
    }

    /// A snapshot of this frame's bindings. Later mutation does not show up in it.
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.0.borrow().bindings.clone()
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("names", &self.names())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn lookup_searches_outward_and_prefers_inner_frames() {
        let global = Environment::bare();
        global.define("x", num(1.0));
        global.define("y", num(2.0));
        let inner = global
            .extend(["x".to_string()], vec![num(10.0)], "f")
            .unwrap();

        assert_eq!(inner.lookup("x").unwrap(), num(10.0));
        assert_eq!(inner.lookup("y").unwrap(), num(2.0));
        assert_eq!(global.lookup("x").unwrap(), num(1.0));
    }

    #[test]
    fn lookup_failure_is_unbound_variable() {
        let err = Environment::bare().lookup("missing").unwrap_err();
        assert_eq!(err, EvalError::unbound("missing"));
    }

    #[test]
    fn define_only_touches_innermost_frame() {
        let global = Environment::bare();
        global.define("x", num(1.0));
        let inner = global.extend(Vec::new(), Vec::new(), "f").unwrap();

        inner.define("x", num(5.0));

        assert_eq!(inner.lookup("x").unwrap(), num(5.0));
        assert_eq!(global.lookup("x").unwrap(), num(1.0));
    }

    #[test]
    fn assign_mutates_nearest_existing_binding() {
        let global = Environment::bare();
        global.define("x", num(1.0));
        let inner = global.extend(Vec::new(), Vec::new(), "f").unwrap();

        inner.assign("x", num(7.0)).unwrap();

        assert!(!inner.is_bound_locally("x"));
        assert_eq!(global.lookup("x").unwrap(), num(7.0));
    }

    #[test]
    fn assign_never_creates_a_binding() {
        let global = Environment::bare();
        let inner = global.extend(Vec::new(), Vec::new(), "f").unwrap();

        let err = inner.assign("ghost", num(1.0)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnboundVariable);
        assert!(global.lookup("ghost").is_err());
    }

    #[test]
    fn extend_rejects_count_mismatch() {
        let global = Environment::bare();
        let err = global
            .extend(["a".to_string(), "b".to_string()], vec![num(1.0)], "add")
            .unwrap_err();
        assert_eq!(err, EvalError::arity("add", Arity::Exactly(2), 1));
    }

    #[test]
    fn depth_and_global_follow_the_chain() {
        let global = Environment::bare();
        let a = global.extend(Vec::new(), Vec::new(), "a").unwrap();
        let b = a.extend(Vec::new(), Vec::new(), "b").unwrap();
        assert_eq!(b.depth(), 3);
        assert!(b.global().ptr_eq(&global));
        assert!(global.is_global());
        assert!(!b.is_global());
    }

    #[test]
    fn primitives_are_installed_once_and_never_clobbered() {
        let env = Environment::with_bindings([("+", num(42.0))]);
        let before = env.names().len();

        env.ensure_primitives();
        env.ensure_primitives();

        assert_eq!(env.names().len(), before);
        assert_eq!(env.lookup("+").unwrap(), num(42.0));
        assert!(env.lookup("car").unwrap().is_callable());
    }

    #[test]
    fn ensure_primitives_fills_a_bare_frame() {
        let env = Environment::bare();
        env.define("a", num(1.0));
        env.ensure_primitives();
        assert_eq!(env.names().len(), atoms::PRIMITIVES.len() + 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let env = Environment::bare();
        env.define("x", num(1.0));
        let snapshot = env.snapshot();
        env.assign("x", num(2.0)).unwrap();
        assert_eq!(snapshot.get("x"), Some(&num(1.0)));
    }
}
