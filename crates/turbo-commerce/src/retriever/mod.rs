//! Lazy, cached catalog retrievers.
//!
//! A [`Retriever`] owns one identifier and fetches the matching entity at most
//! once. Product and category retrievers share the same implementation and
//! differ only in their [`EntityKind`]: the default selection, how nested
//! selections are attached, which filter field an identifier kind maps to, and
//! where the entity list sits in the response.

mod category;
mod product;

use std::cell::OnceCell;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use turbo_data::{GraphqlClient, GraphqlResponse};

use crate::error::CommerceError;
use crate::ids::Identifier;
use crate::query::{self, EqualityFilter, QueryExtensionChain, SelectionSet};

pub use category::{category_filter_field, CategoryKind, CategoryPaging, CategoryRetriever};
pub use product::{product_filter_field, ProductKind, ProductRetriever};

/// What distinguishes one retrievable entity kind from another.
///
/// Implementors are zero-sized markers; all items are associated, so a
/// retriever is fully resolved at compile time.
pub trait EntityKind {
    /// Identifier kinds accepted for this entity.
    type IdentifierType: Copy + PartialEq + fmt::Debug;
    /// The decoded entity.
    type Entity: DeserializeOwned + fmt::Debug;
    /// Extra per-retriever query settings.
    type Settings: Default + fmt::Debug;

    /// Entity name used in logs.
    const NAME: &'static str;

    /// Fields selected before any hook runs.
    fn seed(selection: &mut SelectionSet);

    /// Attach the nested chain's selection, if any.
    fn nest(selection: &mut SelectionSet, nested: &QueryExtensionChain, settings: &Self::Settings);

    /// Filter field used for an identifier kind.
    fn filter_field(kind: Option<Self::IdentifierType>) -> &'static str;

    /// Wrap the entity selection into this kind's list query.
    fn list_query(filter: &EqualityFilter, selection: SelectionSet) -> SelectionSet;

    /// The list of entities in a response, if present.
    fn entity_list(response: &GraphqlResponse) -> Option<&Value>;
}

/// Fetches and caches one catalog entity.
///
/// The cache holds the generated query and the fetch outcome. Both are cleared
/// only by [`Retriever::set_identifier`]; within one identifier the catalog is
/// called at most once, even when the call fails or matches nothing.
pub struct Retriever<K: EntityKind, C> {
    client: C,
    identifier: Option<Identifier<K::IdentifierType>>,
    primary_hooks: QueryExtensionChain,
    nested_hooks: QueryExtensionChain,
    settings: K::Settings,
    query: OnceCell<String>,
    entity: OnceCell<Option<K::Entity>>,
}

impl<K: EntityKind, C: GraphqlClient> Retriever<K, C> {
    /// Create a retriever without an identifier.
    pub fn new(client: C) -> Self {
        Self {
            client,
            identifier: None,
            primary_hooks: QueryExtensionChain::new(),
            nested_hooks: QueryExtensionChain::new(),
            settings: K::Settings::default(),
            query: OnceCell::new(),
            entity: OnceCell::new(),
        }
    }

    /// Replace the identifier and drop any cached query and entity.
    pub fn set_identifier(
        &mut self,
        kind: impl Into<Option<K::IdentifierType>>,
        value: impl Into<String>,
    ) {
        self.identifier = Some(Identifier::with_kind(kind.into(), value));
        self.query = OnceCell::new();
        self.entity = OnceCell::new();
    }

    pub fn identifier(&self) -> Option<&Identifier<K::IdentifierType>> {
        self.identifier.as_ref()
    }

    /// Add fields to the entity selection.
    ///
    /// Hooks run in registration order. Until the first fetch, a new hook
    /// drops any previewed query; after it, the cached query and entity stay.
    pub fn extend_query_with(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.discard_unfetched_query();
        self.primary_hooks.push(hook);
    }

    /// Append a whole chain of entity selection hooks.
    pub fn extend_query_with_chain(&mut self, chain: QueryExtensionChain) {
        self.discard_unfetched_query();
        self.primary_hooks.append(chain);
    }

    /// The entity selection: default fields, hooks, then nested selections.
    pub fn selection(&self) -> SelectionSet {
        let mut selection = SelectionSet::new();
        K::seed(&mut selection);
        self.primary_hooks.apply(&mut selection);
        K::nest(&mut selection, &self.nested_hooks, &self.settings);
        selection
    }

    /// Build the full query for an identifier value, without caching it.
    pub fn generate_query(&self, value: &str) -> String {
        let kind = self.identifier.as_ref().and_then(|id| id.kind);
        let filter = EqualityFilter::new(K::filter_field(kind), value);
        query::operation(&K::list_query(&filter, self.selection()))
    }

    /// The query for the current identifier, built once and then reused.
    ///
    /// Registering hooks or changing settings before the first fetch rebuilds it.
    pub fn query(&self) -> Option<&str> {
        let identifier = self.identifier.as_ref()?;
        Some(
            self.query
                .get_or_init(|| self.generate_query(&identifier.value))
                .as_str(),
        )
    }

    /// The cached query, if one was built.
    pub fn cached_query(&self) -> Option<&str> {
        self.query.get().map(String::as_str)
    }

    /// Whether a fetch already happened for the current identifier.
    pub fn is_populated(&self) -> bool {
        self.entity.get().is_some()
    }

    /// Fetch the entity, or return the cached outcome.
    ///
    /// Returns `None` when no identifier is set, the transport fails, or
    /// nothing matches. Failures are logged, never returned.
    pub fn fetch(&self) -> Option<&K::Entity> {
        let Some(identifier) = self.identifier.as_ref() else {
            tracing::debug!(entity = K::NAME, "no identifier set, nothing to fetch");
            return None;
        };

        self.entity
            .get_or_init(|| {
                let query = self.query().unwrap_or_default();
                match self.execute(query) {
                    Ok(Some(entity)) => Some(entity),
                    Ok(None) => {
                        tracing::debug!(
                            entity = K::NAME,
                            identifier = %identifier.value,
                            "catalog returned no entity"
                        );
                        None
                    }
                    Err(err) => {
                        tracing::error!(
                            entity = K::NAME,
                            identifier = %identifier.value,
                            error = %err,
                            "catalog query failed"
                        );
                        None
                    }
                }
            })
            .as_ref()
    }

    fn execute(&self, query: &str) -> Result<Option<K::Entity>, CommerceError> {
        tracing::debug!(entity = K::NAME, %query, "executing catalog query");
        let response = self.client.execute(query)?;
        if response.has_errors() {
            tracing::debug!(
                entity = K::NAME,
                errors = %response.error_messages(),
                "catalog response carries errors"
            );
        }
        first_entity::<K>(&response)
    }

    /// The query is only frozen by a fetch.
    fn discard_unfetched_query(&mut self) {
        if self.entity.get().is_none() {
            self.query = OnceCell::new();
        }
    }

    pub(crate) fn nested_hooks_mut(&mut self) -> &mut QueryExtensionChain {
        self.discard_unfetched_query();
        &mut self.nested_hooks
    }

    pub(crate) fn settings_mut(&mut self) -> &mut K::Settings {
        self.discard_unfetched_query();
        &mut self.settings
    }
}

impl<K: EntityKind, C> fmt::Debug for Retriever<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("entity", &K::NAME)
            .field("identifier", &self.identifier)
            .field("primary_hooks", &self.primary_hooks)
            .field("nested_hooks", &self.nested_hooks)
            .field("settings", &self.settings)
            .field("query", &self.query.get())
            .field("populated", &self.entity.get().is_some())
            .finish()
    }
}

/// Decode the first element of the entity list.
fn first_entity<K: EntityKind>(response: &GraphqlResponse) -> Result<Option<K::Entity>, CommerceError> {
    let Some(list) = K::entity_list(response) else {
        return Ok(None);
    };
    let items = list.as_array().ok_or_else(|| {
        CommerceError::UnexpectedShape(format!("{} list is not an array", K::NAME))
    })?;
    match items.first() {
        Some(item) => serde_json::from_value(item.clone())
            .map(Some)
            .map_err(|e| CommerceError::Decode {
                entity: K::NAME,
                message: e.to_string(),
            }),
        None => Ok(None),
    }
}
