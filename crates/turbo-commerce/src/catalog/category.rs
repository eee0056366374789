//! Category entities as returned by the catalog API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::ProductInterface;
use crate::ids::CategoryUid;

/// A category from a `categoryList` query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryInterface {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url_key: Option<String>,
    #[serde(default)]
    pub url_path: Option<String>,
    /// Products listed in the category, when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<CategoryProducts>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CategoryInterface {
    /// The canonical key, if selected and non-blank.
    pub fn canonical_uid(&self) -> Option<CategoryUid> {
        self.uid
            .as_deref()
            .filter(|uid| !uid.trim().is_empty())
            .map(CategoryUid::from)
    }

    /// A field selected through a query hook.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One page of products in a category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryProducts {
    #[serde(default)]
    pub items: Vec<ProductInterface>,
    #[serde(default)]
    pub total_count: Option<i64>,
}
