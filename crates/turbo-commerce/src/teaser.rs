//! Variant-aware product access for teaser components.

use turbo_data::GraphqlClient;

use crate::catalog::ProductInterface;
use crate::ids::{CommerceIdentifier, ProductIdentifierType, Sku};
use crate::retriever::ProductRetriever;

/// A product SKU optionally combined with a variant SKU: `base#variant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSku {
    pub base: String,
    pub variant: Option<String>,
}

impl CombinedSku {
    /// Parse an authored selection. Content paths are reduced to their last
    /// segment first. Returns `None` for an empty selection or base SKU.
    pub fn parse(selection: &str) -> Option<Self> {
        let selection = if selection.starts_with('/') {
            selection.rsplit('/').next().unwrap_or_default()
        } else {
            selection
        };

        let (base, variant) = match selection.split_once('#') {
            Some((base, variant)) => (base, Some(variant)),
            None => (selection, None),
        };
        if base.is_empty() {
            return None;
        }

        Some(Self {
            base: base.to_string(),
            variant: variant.filter(|v| !v.is_empty()).map(str::to_string),
        })
    }
}

/// A product selected by an author, resolved to the variant when one was
/// chosen.
pub struct ProductTeaser<C> {
    combined_sku: Option<CombinedSku>,
    retriever: Option<ProductRetriever<C>>,
}

impl<C: GraphqlClient> ProductTeaser<C> {
    /// Without a client no product data is fetched, but the authored SKU is
    /// still reported.
    pub fn new(selection: Option<&str>, client: Option<C>) -> Self {
        let combined_sku = selection.and_then(CombinedSku::parse);
        let retriever = match (&combined_sku, client) {
            (Some(combined), Some(client)) => {
                let mut retriever = ProductRetriever::new(client);
                retriever.set_identifier(ProductIdentifierType::Sku, combined.base.clone());
                retriever.extend_product_query_with(|p| {
                    p.field("__typename");
                });
                retriever.extend_variant_query_with(|v| {
                    v.field("__typename");
                });
                Some(retriever)
            }
            _ => None,
        };

        Self {
            combined_sku,
            retriever,
        }
    }

    pub fn combined_sku(&self) -> Option<&CombinedSku> {
        self.combined_sku.as_ref()
    }

    /// The retriever, for registering query hooks before the first access.
    pub fn retriever_mut(&mut self) -> Option<&mut ProductRetriever<C>> {
        self.retriever.as_mut()
    }

    /// The base product as fetched from the catalog.
    pub fn base_product(&self) -> Option<&ProductInterface> {
        self.retriever.as_ref()?.fetch()
    }

    /// The selected variant when it exists, otherwise the base product.
    pub fn product(&self) -> Option<&ProductInterface> {
        let base = self.base_product()?;
        let variant_sku = self.combined_sku.as_ref()?.variant.as_deref();
        match variant_sku {
            Some(sku) if base.is_configurable() => base.find_variant(sku).or(Some(base)),
            _ => Some(base),
        }
    }

    /// The product SKU, falling back to the authored base SKU.
    pub fn sku(&self) -> Option<&str> {
        self.product()
            .and_then(|p| p.sku.as_deref())
            .or_else(|| self.combined_sku.as_ref().map(|c| c.base.as_str()))
    }

    pub fn commerce_identifier(&self) -> Option<CommerceIdentifier> {
        self.sku()
            .map(|sku| CommerceIdentifier::ProductSku(Sku::new(sku)))
    }

    pub fn is_virtual_product(&self) -> bool {
        self.product().is_some_and(ProductInterface::is_virtual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use turbo_data::InMemoryGraphqlClient;

    fn configurable_client() -> InMemoryGraphqlClient {
        InMemoryGraphqlClient::new().with_response(json!({
            "data": { "products": { "items": [{
                "__typename": "ConfigurableProduct",
                "sku": "MJ01",
                "variants": [
                    { "product": { "__typename": "SimpleProduct", "sku": "MJ01-XS-Red" } }
                ]
            }] } }
        }))
    }

    #[test]
    fn test_parse_combined_sku() {
        assert_eq!(
            CombinedSku::parse("MJ01#MJ01-XS-Red"),
            Some(CombinedSku {
                base: "MJ01".to_string(),
                variant: Some("MJ01-XS-Red".to_string())
            })
        );
        assert_eq!(
            CombinedSku::parse("/var/commerce/products/MJ01"),
            Some(CombinedSku {
                base: "MJ01".to_string(),
                variant: None
            })
        );
        assert_eq!(CombinedSku::parse("MJ01#").unwrap().variant, None);
        assert_eq!(CombinedSku::parse(""), None);
        assert_eq!(CombinedSku::parse("#red"), None);
    }

    #[test]
    fn test_variant_is_selected() {
        let client = configurable_client();
        let teaser = ProductTeaser::new(Some("MJ01#MJ01-XS-Red"), Some(&client));

        assert_eq!(teaser.sku(), Some("MJ01-XS-Red"));
        assert_eq!(teaser.base_product().unwrap().sku.as_deref(), Some("MJ01"));
        assert!(!teaser.is_virtual_product());
        assert_eq!(client.execute_count(), 1);
        assert_eq!(
            client.last_query().as_deref(),
            Some(
                r#"{products(filter:{sku:{eq:"MJ01"}}){items{sku __typename ... on ConfigurableProduct{variants{product{sku __typename}}}}}}"#
            )
        );
    }

    #[test]
    fn test_unknown_variant_falls_back_to_base() {
        let client = configurable_client();
        let teaser = ProductTeaser::new(Some("MJ01#MJ01-XL-Blue"), Some(&client));
        assert_eq!(teaser.sku(), Some("MJ01"));
    }

    #[test]
    fn test_without_client_reports_authored_sku() {
        let teaser = ProductTeaser::<&InMemoryGraphqlClient>::new(Some("MJ01#red"), None);
        assert!(teaser.product().is_none());
        assert_eq!(teaser.sku(), Some("MJ01"));
        assert_eq!(
            teaser.commerce_identifier(),
            Some(CommerceIdentifier::ProductSku(Sku::new("MJ01")))
        );
    }

    #[test]
    fn test_virtual_product() {
        let client = InMemoryGraphqlClient::new().with_response(json!({
            "data": { "products": { "items": [{ "__typename": "VirtualProduct", "sku": "GIFT" }] } }
        }));
        let mut teaser = ProductTeaser::new(Some("GIFT"), Some(&client));
        teaser.retriever_mut().unwrap().extend_product_query_with(|p| {
            p.field("price_range");
        });

        assert!(teaser.is_virtual_product());
        assert!(client
            .last_query()
            .unwrap()
            .contains("{items{sku __typename price_range ... on ConfigurableProduct"));
    }
}
