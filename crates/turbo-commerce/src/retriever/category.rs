//! Category retrieval.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use turbo_data::{GraphqlClient, GraphqlResponse};

use crate::catalog::CategoryInterface;
use crate::ids::CategoryIdentifierType;
use crate::query::{ArgValue, EqualityFilter, QueryExtensionChain, SelectionSet};
use crate::retriever::{EntityKind, Retriever};

/// Retrieves one category by UID or URL path.
pub type CategoryRetriever<C> = Retriever<CategoryKind, C>;

/// Category filter field for an identifier kind.
///
/// Only UIDs and URL paths can be filtered on; other or missing kinds fall
/// back to the UID filter.
pub fn category_filter_field(kind: Option<CategoryIdentifierType>) -> &'static str {
    match kind {
        Some(CategoryIdentifierType::Uid) => "category_uid",
        Some(CategoryIdentifierType::UrlPath) => "url_path",
        Some(other) => {
            tracing::warn!(
                identifier_type = other.as_str(),
                "category identifier type is not supported, falling back to UID based categoryList query"
            );
            "category_uid"
        }
        None => {
            tracing::warn!("category identifier type is not set, falling back to UID based categoryList query");
            "category_uid"
        }
    }
}

/// Paging of the products listed inside a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPaging {
    /// 1-based page number.
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for CategoryPaging {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 6,
        }
    }
}

/// Categories: `categoryList(filters:{...}){...}`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryKind;

impl EntityKind for CategoryKind {
    type IdentifierType = CategoryIdentifierType;
    type Entity = CategoryInterface;
    type Settings = CategoryPaging;

    const NAME: &'static str = "category";

    fn seed(selection: &mut SelectionSet) {
        selection.field("uid");
    }

    fn nest(selection: &mut SelectionSet, product_hooks: &QueryExtensionChain, paging: &CategoryPaging) {
        if product_hooks.is_empty() {
            return;
        }
        let args = vec![
            ("currentPage".to_string(), ArgValue::from(paging.current_page)),
            ("pageSize".to_string(), ArgValue::from(paging.page_size)),
        ];
        selection.field_with_args("products", args, |products| {
            products.field_with("items", |items| {
                items.field("sku");
                product_hooks.apply(items);
            });
        });
    }

    fn filter_field(kind: Option<CategoryIdentifierType>) -> &'static str {
        category_filter_field(kind)
    }

    fn list_query(filter: &EqualityFilter, selection: SelectionSet) -> SelectionSet {
        let mut root = SelectionSet::new();
        root.field_with_args("categoryList", vec![("filters".to_string(), filter.to_arg())], |list| {
            *list = selection;
        });
        root
    }

    fn entity_list(response: &GraphqlResponse) -> Option<&Value> {
        response.root_field("categoryList")
    }
}

impl<C: GraphqlClient> Retriever<CategoryKind, C> {
    /// Alias of [`Retriever::extend_query_with`] for the category selection.
    pub fn extend_category_query_with(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.extend_query_with(hook);
    }

    /// Add fields to the selection of the products listed in the category.
    pub fn extend_product_query_with(&mut self, hook: impl Fn(&mut SelectionSet) + 'static) {
        self.nested_hooks_mut().push(hook);
    }

    /// Pages are 1-based; 0 is raised to 1.
    pub fn set_current_page(&mut self, current_page: u32) {
        self.settings_mut().current_page = current_page.max(1);
    }

    /// A page holds at least one product.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.settings_mut().page_size = page_size.max(1);
    }

    pub fn set_paging(&mut self, paging: CategoryPaging) {
        *self.settings_mut() = CategoryPaging {
            current_page: paging.current_page.max(1),
            page_size: paging.page_size.max(1),
        };
    }

    /// Same as [`Retriever::fetch`].
    pub fn fetch_category(&self) -> Option<&CategoryInterface> {
        self.fetch()
    }

    /// Filter and selection for embedding this category into a larger query.
    ///
    /// Underscores in `identifier` stand for slashes, the URL-safe encoding of
    /// a category URL path.
    pub fn category_query_args_for(&self, identifier: &str) -> (EqualityFilter, SelectionSet) {
        let kind = self.identifier().and_then(|id| id.kind);
        let filter = EqualityFilter::new(category_filter_field(kind), identifier.replace('_', "/"));
        (filter, self.selection())
    }

    /// [`Self::category_query_args_for`] using the current identifier.
    pub fn category_query_args(&self) -> Option<(EqualityFilter, SelectionSet)> {
        let value = self.identifier()?.value.clone();
        Some(self.category_query_args_for(&value))
    }
}
