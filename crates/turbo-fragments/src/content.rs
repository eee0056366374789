//! Content tree model and the collaborators that expose it.
//!
//! The content repository itself is not part of this crate. Resolution talks
//! to it only through the traits below, bundled in [`ContentServices`].

use std::collections::BTreeMap;

use crate::error::ContentError;
use crate::query::FragmentQuery;

/// Last segment of a slash-separated path.
pub fn path_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent of a slash-separated path. The root has no parent.
pub fn parent_path(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) if trimmed.len() > 1 => Some("/"),
        Some(0) | None => None,
        Some(index) => Some(&trimmed[..index]),
    }
}

/// Whether `path` is `ancestor` or lies below it.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    let ancestor = ancestor.trim_end_matches('/');
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// An addressable item in the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: String,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        path_name(&self.path)
    }

    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }
}

/// A content page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    path: String,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        path_name(&self.path)
    }

    pub fn parent_path(&self) -> Option<&str> {
        parent_path(&self.path)
    }
}

/// A node returned by a content query, with its multi-valued properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentNode {
    pub path: String,
    pub properties: BTreeMap<String, Vec<String>>,
}

impl ContentNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Append a value to a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_property(&self, name: &str) -> bool {
        !self.values(name).is_empty()
    }
}

/// A live copy: content synchronized from a blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCopy {
    /// Path of the source content.
    pub blueprint_path: String,
    /// Path of the synchronized copy.
    pub path: String,
}

impl LiveCopy {
    pub fn new(blueprint_path: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            blueprint_path: blueprint_path.into(),
            path: path.into(),
        }
    }
}

/// The multi-site-sync link between a resource and a live copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LiveRelationship {
    pub live_copy: Option<LiveCopy>,
}

/// Looks resources up by path.
pub trait ResourceResolver {
    fn resource(&self, path: &str) -> Option<Resource>;
}

/// Looks pages up by path.
pub trait PageManager {
    fn page(&self, path: &str) -> Option<Page>;
}

/// Runs structured content queries.
///
/// Repository-backed implementations must run [`FragmentQuery::statement`]
/// in [`FragmentQuery::language`] and return the matching node paths in the
/// repository's order. [`FragmentQuery::matches`] evaluates the same
/// predicate in process and is only meant for stores that hold their nodes
/// in memory.
pub trait QueryExecutor {
    fn execute(&self, query: &FragmentQuery) -> Result<Vec<String>, ContentError>;
}

/// Finds the language root page above a resource.
pub trait LanguageManager {
    fn language_root(&self, resource: &Resource) -> Option<Page>;
}

/// Multi-site-sync relationships.
pub trait LiveRelationshipManager {
    /// Whether the resource is blueprint source content.
    fn is_source(&self, resource: &Resource) -> Result<bool, ContentError>;

    /// Relationships from a blueprint source to its live copies.
    fn live_relationships(&self, resource: &Resource) -> Result<Vec<LiveRelationship>, ContentError>;

    /// Whether the resource lies inside a live copy.
    fn has_live_relationship(&self, resource: &Resource) -> Result<bool, ContentError>;

    /// The relationship of a live-copy resource.
    fn live_relationship(&self, resource: &Resource) -> Result<Option<LiveRelationship>, ContentError>;
}

/// The content collaborators used during one resolution.
#[derive(Clone, Copy)]
pub struct ContentServices<'a> {
    pub resources: &'a dyn ResourceResolver,
    pub pages: &'a dyn PageManager,
    pub queries: &'a dyn QueryExecutor,
    pub languages: &'a dyn LanguageManager,
    pub relationships: &'a dyn LiveRelationshipManager,
}

impl<'a> ContentServices<'a> {
    /// Use one store for every collaborator.
    pub fn from_store<S>(store: &'a S) -> Self
    where
        S: ResourceResolver + PageManager + QueryExecutor + LanguageManager + LiveRelationshipManager,
    {
        Self {
            resources: store,
            pages: store,
            queries: store,
            languages: store,
            relationships: store,
        }
    }
}
