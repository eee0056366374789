//! Canonical identifier resolution for the rendering request.

use std::collections::HashMap;

use turbo_commerce::prelude::*;
use turbo_data::GraphqlClient;

/// The kind of page being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Product,
    Category,
    Other,
}

/// The incoming page request.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub uri: String,
    /// Parameters extracted from the URL by routing.
    pub params: HashMap<String, String>,
}

impl RenderRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Extracts the catalog identifier a request refers to.
pub trait UrlProvider {
    fn product_identifier(&self, request: &RenderRequest) -> Option<Identifier<ProductIdentifierType>>;

    fn category_identifier(&self, request: &RenderRequest) -> Option<Identifier<CategoryIdentifierType>>;
}

/// Reads identifiers from route parameters named after the identifier kind
/// (`sku`, `url_key`, `uid`, `url_path`). Canonical kinds take precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteParamsUrlProvider;

impl UrlProvider for RouteParamsUrlProvider {
    fn product_identifier(&self, request: &RenderRequest) -> Option<Identifier<ProductIdentifierType>> {
        [ProductIdentifierType::Sku, ProductIdentifierType::UrlKey]
            .into_iter()
            .find_map(|kind| request.param(kind.as_str()).map(|value| Identifier::new(kind, value)))
    }

    fn category_identifier(&self, request: &RenderRequest) -> Option<Identifier<CategoryIdentifierType>> {
        [
            CategoryIdentifierType::Uid,
            CategoryIdentifierType::UrlPath,
            CategoryIdentifierType::UrlKey,
            CategoryIdentifierType::Id,
        ]
        .into_iter()
        .find_map(|kind| request.param(kind.as_str()).map(|value| Identifier::new(kind, value)))
    }
}

/// Resolves the canonical key of the catalog entity a page shows.
///
/// Canonical identifiers are used as they are. Anything else is looked up
/// through a catalog retriever, which only exists when a GraphQL client was
/// supplied.
pub struct IdentifierResolver<'a, C> {
    url_provider: &'a dyn UrlProvider,
    product_retriever: Option<ProductRetriever<C>>,
    category_retriever: Option<CategoryRetriever<C>>,
}

impl<'a, C: GraphqlClient + Clone> IdentifierResolver<'a, C> {
    pub fn new(url_provider: &'a dyn UrlProvider, client: Option<C>) -> Self {
        let (product_retriever, category_retriever) = match client {
            Some(client) => (
                Some(ProductRetriever::new(client.clone())),
                Some(CategoryRetriever::new(client)),
            ),
            None => (None, None),
        };
        Self {
            url_provider,
            product_retriever,
            category_retriever,
        }
    }
}

impl<'a, C: GraphqlClient> IdentifierResolver<'a, C> {
    pub fn product_retriever(&self) -> Option<&ProductRetriever<C>> {
        self.product_retriever.as_ref()
    }

    pub fn category_retriever(&self) -> Option<&CategoryRetriever<C>> {
        self.category_retriever.as_ref()
    }

    /// The canonical key for the page, or `None` for pages that show no
    /// catalog entity or whose entity cannot be resolved.
    pub fn resolve(&mut self, kind: PageKind, request: &RenderRequest) -> Option<CommerceIdentifier> {
        match kind {
            PageKind::Product => {
                let identifier = self.url_provider.product_identifier(request);
                self.resolve_product(identifier).map(CommerceIdentifier::ProductSku)
            }
            PageKind::Category => {
                let identifier = self.url_provider.category_identifier(request);
                self.resolve_category(identifier).map(CommerceIdentifier::CategoryUid)
            }
            PageKind::Other => None,
        }
    }

    /// Resolve a product identifier to its SKU.
    pub fn resolve_product(&mut self, identifier: Option<Identifier<ProductIdentifierType>>) -> Option<Sku> {
        let sku = identifier.and_then(|identifier| match identifier.kind {
            Some(kind) if kind.is_canonical() => Some(Sku::new(identifier.value)),
            kind => {
                let retriever = self.product_retriever.as_mut()?;
                retriever.set_identifier(kind, identifier.value);
                retriever.fetch().and_then(ProductInterface::canonical_sku)
            }
        });

        match sku {
            Some(sku) if !sku.is_blank() => Some(sku),
            _ => {
                tracing::warn!("cannot find sku or product for current request");
                None
            }
        }
    }

    /// Resolve a category identifier to its UID.
    pub fn resolve_category(
        &mut self,
        identifier: Option<Identifier<CategoryIdentifierType>>,
    ) -> Option<CategoryUid> {
        let uid = identifier.and_then(|identifier| match identifier.kind {
            Some(kind) if kind.is_canonical() => Some(CategoryUid::new(identifier.value)),
            kind => {
                let retriever = self.category_retriever.as_mut()?;
                retriever.set_identifier(kind, identifier.value);
                retriever.fetch().and_then(CategoryInterface::canonical_uid)
            }
        });

        match uid {
            Some(uid) if !uid.is_blank() => Some(uid),
            _ => {
                tracing::warn!("cannot find uid or category for current request");
                None
            }
        }
    }
}
