//! Catalog identifiers.
//!
//! Canonical keys are newtypes so a SKU cannot be passed where a category UID
//! is expected. URL-level identifiers carry a kind telling which catalog field
//! the value refers to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical keys are plain strings on the wire.
macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Empty or whitespace-only keys identify nothing.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(
    /// Product stock keeping unit.
    Sku
);
define_key!(
    /// Category unique id, as issued by the catalog.
    CategoryUid
);

/// Which product field a URL identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductIdentifierType {
    /// The canonical stock keeping unit.
    Sku,
    /// The URL slug.
    UrlKey,
}

impl ProductIdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductIdentifierType::Sku => "sku",
            ProductIdentifierType::UrlKey => "url_key",
        }
    }

    /// Whether values of this kind are already canonical keys.
    pub fn is_canonical(&self) -> bool {
        matches!(self, ProductIdentifierType::Sku)
    }
}

/// Which category field a URL identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIdentifierType {
    /// Legacy numeric id.
    Id,
    /// The canonical category UID.
    Uid,
    /// The URL slug of the category itself.
    UrlKey,
    /// The slash-separated slug path from the root category.
    UrlPath,
}

impl CategoryIdentifierType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryIdentifierType::Id => "id",
            CategoryIdentifierType::Uid => "uid",
            CategoryIdentifierType::UrlKey => "url_key",
            CategoryIdentifierType::UrlPath => "url_path",
        }
    }

    /// Whether values of this kind are already canonical keys.
    pub fn is_canonical(&self) -> bool {
        matches!(self, CategoryIdentifierType::Uid)
    }
}

/// An identifier value tagged with its kind.
///
/// The kind is optional: URL parsers may find a value without knowing which
/// field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier<T> {
    pub kind: Option<T>,
    pub value: String,
}

impl<T> Identifier<T> {
    pub fn new(kind: T, value: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            value: value.into(),
        }
    }

    /// An identifier whose kind may or may not be known.
    pub fn with_kind(kind: Option<T>, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// An identifier whose kind is unknown.
    pub fn untyped(value: impl Into<String>) -> Self {
        Self {
            kind: None,
            value: value.into(),
        }
    }

    /// Empty or whitespace-only values identify nothing.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl<T: Copy + fmt::Debug> fmt::Display for Identifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{:?}:{}", kind, self.value),
            None => write!(f, "?:{}", self.value),
        }
    }
}

/// The canonical key of a catalog entity, tagged with the entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CommerceIdentifier {
    ProductSku(Sku),
    CategoryUid(CategoryUid),
}

impl CommerceIdentifier {
    /// The raw key value.
    pub fn value(&self) -> &str {
        match self {
            CommerceIdentifier::ProductSku(sku) => sku.as_str(),
            CommerceIdentifier::CategoryUid(uid) => uid.as_str(),
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, CommerceIdentifier::ProductSku(_))
    }
}

impl fmt::Display for CommerceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommerceIdentifier::ProductSku(sku) => write!(f, "product:{}", sku),
            CommerceIdentifier::CategoryUid(uid) => write!(f, "category:{}", uid),
        }
    }
}
