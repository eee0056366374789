//! Fragment lookup query.

use turbo_commerce::CommerceIdentifier;

use crate::content::{is_same_or_descendant, ContentNode};

/// Node type of page content.
pub const PAGE_CONTENT_TYPE: &str = "cq:PageContent";
/// Property holding the product SKUs a fragment is associated with.
pub const PN_PRODUCTS: &str = "cq:products";
/// Property holding the category UIDs a fragment is associated with.
pub const PN_CATEGORIES: &str = "cq:categories";
/// Property holding the fragment placement.
pub const PN_FRAGMENT_LOCATION: &str = "fragmentLocation";

/// Separator between a product SKU and a variant SKU in `cq:products`.
pub const VARIANT_SEPARATOR: char = '#';

/// Query languages understood by a [`crate::content::QueryExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryLanguage {
    JcrSql2,
}

impl QueryLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryLanguage::JcrSql2 => "JCR-SQL2",
        }
    }
}

/// Finds fragment content nodes associated with one catalog entity.
///
/// A node matches when it lies below `scope`, its association property
/// references the identifier, and its placement equals `location` (or it has
/// no placement when `location` is `None`). Product associations also match
/// variant references: SKU `ABC123` matches `ABC123` and `ABC123#red`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentQuery {
    scope: String,
    identifier: CommerceIdentifier,
    location: Option<String>,
}

impl FragmentQuery {
    pub fn new(scope: impl Into<String>, identifier: CommerceIdentifier, location: Option<String>) -> Self {
        Self {
            scope: scope.into(),
            identifier,
            location,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn identifier(&self) -> &CommerceIdentifier {
        &self.identifier
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn language(&self) -> QueryLanguage {
        QueryLanguage::JcrSql2
    }

    /// The association property searched for this identifier.
    pub fn association_property(&self) -> &'static str {
        match self.identifier {
            CommerceIdentifier::ProductSku(_) => PN_PRODUCTS,
            CommerceIdentifier::CategoryUid(_) => PN_CATEGORIES,
        }
    }

    /// The query statement in [`Self::language`].
    pub fn statement(&self) -> String {
        let mut clauses = vec![format!("ISDESCENDANTNODE('{}')", quote(&self.scope))];

        let property = self.association_property();
        let value = quote(self.identifier.value());
        clauses.push(match self.identifier {
            CommerceIdentifier::ProductSku(_) => format!(
                "(node.[{property}] = '{value}' OR node.[{property}] LIKE '{}{VARIANT_SEPARATOR}%')",
                quote(&escape_like(self.identifier.value())),
            ),
            CommerceIdentifier::CategoryUid(_) => format!("node.[{property}] = '{value}'"),
        });

        clauses.push(match &self.location {
            Some(location) => format!("node.[{PN_FRAGMENT_LOCATION}] = '{}'", quote(location)),
            None => format!("node.[{PN_FRAGMENT_LOCATION}] IS NULL"),
        });

        format!(
            "SELECT * FROM [{PAGE_CONTENT_TYPE}] as node WHERE {}",
            clauses.join(" AND ")
        )
    }

    /// Evaluate the query against a node.
    pub fn matches(&self, node: &ContentNode) -> bool {
        if node.path == self.scope || !is_same_or_descendant(&node.path, &self.scope) {
            return false;
        }

        let key = self.identifier.value();
        let referenced = node.values(self.association_property()).iter().any(|value| {
            value == key
                || (self.identifier.is_product()
                    && value
                        .strip_prefix(key)
                        .is_some_and(|rest| rest.starts_with(VARIANT_SEPARATOR)))
        });
        if !referenced {
            return false;
        }

        match &self.location {
            Some(location) => node.values(PN_FRAGMENT_LOCATION).iter().any(|v| v == location),
            None => !node.has_property(PN_FRAGMENT_LOCATION),
        }
    }
}

/// Quote a string literal: single quotes are doubled.
fn quote(value: &str) -> String {
    value.replace('\'', "''")
}

/// Escape LIKE wildcards so the pattern prefix is taken literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
