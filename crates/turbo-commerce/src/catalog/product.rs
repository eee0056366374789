//! Product entities as returned by the catalog API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::Sku;

/// A product from a `products` query.
///
/// Only the fields the core relies on are typed; anything selected through
/// query hooks is kept in [`ProductInterface::fields`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductInterface {
    /// Concrete GraphQL type, e.g. `SimpleProduct` or `ConfigurableProduct`.
    #[serde(rename = "__typename", default, skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url_key: Option<String>,
    /// Variants of a configurable product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<ConfigurableVariant>>,
    /// Every other selected field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ProductInterface {
    /// The canonical key, if selected and non-blank.
    pub fn canonical_sku(&self) -> Option<Sku> {
        self.sku
            .as_deref()
            .filter(|sku| !sku.trim().is_empty())
            .map(Sku::from)
    }

    pub fn is_configurable(&self) -> bool {
        self.typename.as_deref() == Some("ConfigurableProduct") || self.variants.is_some()
    }

    pub fn is_virtual(&self) -> bool {
        self.typename.as_deref() == Some("VirtualProduct")
    }

    /// Find the variant product with the given SKU.
    pub fn find_variant(&self, variant_sku: &str) -> Option<&ProductInterface> {
        self.variants
            .as_deref()?
            .iter()
            .filter_map(|v| v.product.as_ref())
            .find(|p| p.sku.as_deref() == Some(variant_sku))
    }

    /// A field selected through a query hook.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One variant of a configurable product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurableVariant {
    #[serde(default)]
    pub product: Option<ProductInterface>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
