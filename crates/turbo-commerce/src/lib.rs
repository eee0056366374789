//! Catalog retrieval over GraphQL for TurboCommerce.
//!
//! This crate turns an "identifier + identifier kind" pair into a catalog
//! entity:
//!
//! - **Identifiers**: canonical keys (SKU, category UID) and URL-level identifiers
//! - **Query**: GraphQL selection sets and ordered hook chains that extend them
//! - **Catalog**: product and category entities decoded from responses
//! - **Retrievers**: lazy, at-most-once fetching per identifier
//! - **Teaser**: variant-aware product access for `sku#variant` selections
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_commerce::prelude::*;
//! use turbo_data::HttpGraphqlClient;
//!
//! let client = HttpGraphqlClient::new("https://shop.example/graphql");
//! let mut retriever = ProductRetriever::new(&client);
//! retriever.set_identifier(ProductIdentifierType::UrlKey, "joust-duffle-bag");
//! retriever.extend_product_query_with(|p| {
//!     p.field("name").field("url_key");
//! });
//!
//! // One catalog call, however many accessors ask.
//! let name = retriever.fetch().and_then(|p| p.name.clone());
//! let sku = retriever.fetch().and_then(|p| p.canonical_sku());
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod query;
pub mod retriever;
pub mod teaser;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{CategoryInterface, CategoryProducts, ConfigurableVariant, ProductInterface};

    // Query
    pub use crate::query::{ArgValue, EqualityFilter, QueryExtensionChain, SelectionSet};

    // Retrievers
    pub use crate::retriever::{
        category_filter_field, product_filter_field, CategoryKind, CategoryPaging,
        CategoryRetriever, EntityKind, ProductKind, ProductRetriever, Retriever,
    };

    // Teaser
    pub use crate::teaser::{CombinedSku, ProductTeaser};
}
