//! GraphQL query composition.
//!
//! Queries are assembled from a [`SelectionSet`] tree and rendered to the
//! compact GraphQL text sent to the catalog API.

mod extension;
mod selection;

pub use extension::{QueryExtensionChain, SelectionHook};
pub use selection::{ArgValue, Field, Selection, SelectionSet};

/// An equality filter on one catalog field: `{field:{eq:"value"}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityFilter {
    pub field: &'static str,
    pub value: String,
}

impl EqualityFilter {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// The filter as an input object argument value.
    pub fn to_arg(&self) -> ArgValue {
        ArgValue::object([(
            self.field,
            ArgValue::object([("eq", ArgValue::from(self.value.as_str()))]),
        )])
    }
}

/// Wrap a root selection into an anonymous query operation.
pub fn operation(root: &SelectionSet) -> String {
    root.to_graphql()
}
