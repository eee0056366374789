//! Product retrieval.

use serde_json::Value;
use turbo_data::{GraphqlClient, GraphqlResponse};

use crate::catalog::ProductInterface;
use crate::ids::ProductIdentifierType;
use crate::query::{EqualityFilter, QueryExtensionChain, SelectionSet};
use crate::retriever::{EntityKind, Retriever};

/// Retrieves one product by SKU or URL key.
pub type ProductRetriever<C> = Retriever<ProductKind, C>;

/// Product filter field for an identifier kind. Anything but a URL key filters
/// on the SKU.
pub fn product_filter_field(kind: Option<ProductIdentifierType>) -> &'static str {
    match kind {
        Some(ProductIdentifierType::UrlKey) => "url_key",
        Some(ProductIdentifierType::Sku) | None => "sku",
    }
}

/// Products: `products(filter:{...}){items{...}}`.
#[derive(Debug, Clone, Copy)]
pub struct ProductKind;

impl EntityKind for ProductKind {
    type IdentifierType = ProductIdentifierType;
    type Entity = ProductInterface;
    type Settings = ();

    const NAME: &'static str = "product";

    fn seed(selection: &mut SelectionSet) {
        selection.field("sku");
    }

    fn nest(selection: &mut SelectionSet, variant_hooks: &QueryExtensionChain, _: &()) {
        if variant_hooks.is_empty() {
            return;
        }
        selection.on("ConfigurableProduct", |cp| {
            cp.field_with("variants", |v| {
                v.field_with("product", |p| {
                    p.field("sku");
                    variant_hooks.apply(p);
                });
            });
        });
    }

    fn filter_field(kind: Option<ProductIdentifierType>) -> &'static str {
        product_filter_field(kind)
    }

    fn list_query(filter: &EqualityFilter, selection: SelectionSet) -> SelectionSet {
        let mut root = SelectionSet::new();
        root.field_with_args("products", vec![("filter".to_string(), filter.to_arg())], |p| {
            p.field_with("items", |items| *items = selection);
        });
        root
    }

    fn entity_list(response: &GraphqlResponse) -> Option<&Value> {
        response
            .root_field("products")
            .and_then(|products| products.get("items"))
            .filter(|items| !items.is_null())
    }
}

impl<C: GraphqlClient> Retriever<ProductKind, C> {
    /// Alias of [`Retriever::extend_query_with`] for the product selection.
    pub fn extend_product_query_with(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.extend_query_with(hook);
    }

    /// Add fields to the selection of each configurable product variant.
    pub fn extend_variant_query_with(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.nested_hooks_mut().push(hook);
    }

    /// Same as [`Retriever::fetch`].
    pub fn fetch_product(&self) -> Option<&ProductInterface> {
        self.fetch()
    }
}
