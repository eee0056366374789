//! Ordered chains of selection hooks.

use std::fmt;

use crate::query::SelectionSet;

/// A selection hook: adds fields to a selection set.
pub type SelectionHook = Box<dyn Fn(&mut SelectionSet)>;

/// An append-only list of selection hooks, applied in registration order.
#[derive(Default)]
pub struct QueryExtensionChain {
    hooks: Vec<SelectionHook>,
}

impl QueryExtensionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook after all previously registered ones.
    pub fn push(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Move all hooks of `other` to the end of this chain.
    pub fn append(&mut self, mut other: QueryExtensionChain) {
        self.hooks.append(&mut other.hooks);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Run every hook against `selection`, oldest first.
    pub fn apply(&self, selection: &mut SelectionSet) {
        for hook in &self.hooks {
            hook(selection);
        }
    }
}

impl fmt::Debug for QueryExtensionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryExtensionChain")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
