//! Commerce-aware experience fragment resolution for TurboCommerce.
//!
//! Given the page being rendered and the incoming request, find the authored
//! content fragment associated with the product or category the page shows:
//!
//! 1. resolve the canonical catalog key (SKU or category UID), going through
//!    the catalog only for non-canonical URL identifiers
//! 2. find the page's localization root (language root, blueprint, live copy)
//! 3. map it into fragment storage and query for fragments referencing the key
//! 4. take the first match and derive the fragment name from the page tree
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_fragments::prelude::*;
//!
//! let config = FragmentConfig::from_toml_str(r#"fragment_location = "footer""#)?;
//! let provider = RouteParamsUrlProvider;
//! let fragment = CommerceExperienceFragment::resolve(ResolutionContext {
//!     page: CurrentPage::new("/content/venia/us/en/products/product-page", PageKind::Product),
//!     request: RenderRequest::new("/p/bag.html").with_param("url_key", "joust-duffle-bag"),
//!     config: &config,
//!     identifiers: IdentifierResolver::new(&provider, Some(&client)),
//!     services: ContentServices::from_store(&repository),
//! });
//! println!("{:?}", fragment.name());
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod experience_fragment;
pub mod localization;
pub mod memory;
pub mod query;
pub mod resolver;

pub use config::FragmentConfig;
pub use error::ContentError;
pub use experience_fragment::{CommerceExperienceFragment, CurrentPage, ResolutionContext};
pub use memory::InMemoryContentStore;
pub use query::FragmentQuery;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::FragmentConfig;
    pub use crate::content::{
        ContentNode, ContentServices, LanguageManager, LiveCopy, LiveRelationship,
        LiveRelationshipManager, Page, PageManager, QueryExecutor, Resource, ResourceResolver,
    };
    pub use crate::error::ContentError;
    pub use crate::experience_fragment::{CommerceExperienceFragment, CurrentPage, ResolutionContext};
    pub use crate::localization::{localization_root, LocalizationRoot};
    pub use crate::memory::InMemoryContentStore;
    pub use crate::query::{FragmentQuery, QueryLanguage};
    pub use crate::resolver::{IdentifierResolver, PageKind, RenderRequest, RouteParamsUrlProvider, UrlProvider};
}
