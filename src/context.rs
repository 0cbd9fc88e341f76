//! Immutable execution context.
//!
//! A [`Context`] is a chain of key-value entries passed down a call chain.
//! Keys are types: only code that can name the key type can read or shadow
//! its entry. Adding a value returns a new context and leaves the original
//! as it was, so sibling branches derived from one parent never see each
//! other's values.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Entry {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

/// Chainable, immutable key-value carrier.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

impl Context {
    /// An empty context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Return a child context with `value` stored under key type `K`.
    pub fn with_value<K, V>(&self, value: V) -> Context
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        Context {
            head: Some(Arc::new(Entry {
                key: TypeId::of::<K>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The nearest value stored under `K`, whatever its type.
    pub fn value<K: 'static>(&self) -> Option<&(dyn Any + Send + Sync)> {
        let key = TypeId::of::<K>();
        let mut entry = self.head.as_deref();
        while let Some(current) = entry {
            if current.key == key {
                return Some(current.value.as_ref());
            }
            entry = current.parent.as_deref();
        }
        None
    }

    /// The nearest value stored under `K`, if it is a `V`.
    pub fn get<K: 'static, V: 'static>(&self) -> Option<&V> {
        self.value::<K>()?.downcast_ref::<V>()
    }

    /// Number of entries in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut entry = self.head.as_deref();
        while let Some(current) = entry {
            depth += 1;
            entry = current.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth()).finish()
    }
}
