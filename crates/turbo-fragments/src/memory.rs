//! In-memory content store for testing and local development.

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::content::{
    is_same_or_descendant, ContentNode, LanguageManager, LiveCopy, LiveRelationship,
    LiveRelationshipManager, Page, PageManager, QueryExecutor, Resource, ResourceResolver,
};
use crate::error::ContentError;
use crate::query::{FragmentQuery, QueryLanguage};

/// Content store backed by plain collections.
///
/// Query results come back in node insertion order. Failures can be injected
/// for the query and multi-site-sync collaborators.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    resources: BTreeSet<String>,
    pages: BTreeSet<String>,
    nodes: Vec<ContentNode>,
    language_roots: Vec<String>,
    live_copies: Vec<LiveCopy>,
    query_failure: Option<String>,
    relationship_failure: Option<String>,
    executed: RefCell<Vec<(QueryLanguage, String)>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, path: impl Into<String>) -> Self {
        self.resources.insert(path.into());
        self
    }

    /// Add a page. Pages are resources too.
    pub fn with_page(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.resources.insert(path.clone());
        self.pages.insert(path);
        self
    }

    /// Add a queryable node. The node is not resolvable as a resource unless
    /// added with [`Self::with_resource`].
    pub fn with_node(mut self, node: ContentNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add a fragment page with one variation page whose content node is
    /// built by `content`.
    pub fn with_experience_fragment(
        self,
        fragment_path: &str,
        variation: &str,
        content: impl FnOnce(ContentNode) -> ContentNode,
    ) -> Self {
        let variation_path = format!("{fragment_path}/{variation}");
        let node_path = format!("{variation_path}/jcr:content");
        let node = content(ContentNode::new(node_path.clone()));
        self.with_page(fragment_path)
            .with_page(variation_path)
            .with_resource(node_path)
            .with_node(node)
    }

    /// Register a language root page. Resources below it report it as their
    /// language root; the deepest registered root wins.
    pub fn with_language_root(self, path: impl Into<String>) -> Self {
        let path = path.into();
        let mut store = self.with_page(path.clone());
        store.language_roots.push(path);
        store
    }

    /// Register a blueprint and its live copy.
    pub fn with_live_copy(mut self, live_copy: LiveCopy) -> Self {
        self.live_copies.push(live_copy);
        self
    }

    /// Make every query fail.
    pub fn failing_queries(mut self, message: impl Into<String>) -> Self {
        self.query_failure = Some(message.into());
        self
    }

    /// Make every multi-site-sync lookup fail.
    pub fn failing_relationships(mut self, message: impl Into<String>) -> Self {
        self.relationship_failure = Some(message.into());
        self
    }

    /// Statements of every executed query, in order.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.borrow().iter().map(|(_, statement)| statement.clone()).collect()
    }

    /// Language and statement of every executed query, in order.
    pub fn executed_queries(&self) -> Vec<(QueryLanguage, String)> {
        self.executed.borrow().clone()
    }

    fn check_relationships(&self) -> Result<(), ContentError> {
        match &self.relationship_failure {
            Some(message) => Err(ContentError::Relationship(message.clone())),
            None => Ok(()),
        }
    }
}

impl ResourceResolver for InMemoryContentStore {
    fn resource(&self, path: &str) -> Option<Resource> {
        self.resources.contains(path).then(|| Resource::new(path))
    }
}

impl PageManager for InMemoryContentStore {
    fn page(&self, path: &str) -> Option<Page> {
        self.pages.contains(path).then(|| Page::new(path))
    }
}

impl QueryExecutor for InMemoryContentStore {
    fn execute(&self, query: &FragmentQuery) -> Result<Vec<String>, ContentError> {
        // Nodes live in memory, so the statement is recorded and its
        // predicate evaluated in process.
        self.executed.borrow_mut().push((query.language(), query.statement()));
        if let Some(message) = &self.query_failure {
            return Err(ContentError::Query(message.clone()));
        }

        Ok(self
            .nodes
            .iter()
            .filter(|node| query.matches(node))
            .map(|node| node.path.clone())
            .collect())
    }
}

impl LanguageManager for InMemoryContentStore {
    fn language_root(&self, resource: &Resource) -> Option<Page> {
        self.language_roots
            .iter()
            .filter(|root| is_same_or_descendant(resource.path(), root))
            .max_by_key(|root| root.len())
            .map(Page::new)
    }
}

impl LiveRelationshipManager for InMemoryContentStore {
    fn is_source(&self, resource: &Resource) -> Result<bool, ContentError> {
        self.check_relationships()?;
        Ok(self
            .live_copies
            .iter()
            .any(|lc| is_same_or_descendant(resource.path(), &lc.blueprint_path)))
    }

    fn live_relationships(&self, resource: &Resource) -> Result<Vec<LiveRelationship>, ContentError> {
        self.check_relationships()?;
        Ok(self
            .live_copies
            .iter()
            .filter(|lc| is_same_or_descendant(resource.path(), &lc.blueprint_path))
            .map(|lc| LiveRelationship {
                live_copy: Some(lc.clone()),
            })
            .collect())
    }

    fn has_live_relationship(&self, resource: &Resource) -> Result<bool, ContentError> {
        self.check_relationships()?;
        Ok(self
            .live_copies
            .iter()
            .any(|lc| is_same_or_descendant(resource.path(), &lc.path)))
    }

    fn live_relationship(&self, resource: &Resource) -> Result<Option<LiveRelationship>, ContentError> {
        self.check_relationships()?;
        Ok(self
            .live_copies
            .iter()
            .find(|lc| is_same_or_descendant(resource.path(), &lc.path))
            .map(|lc| LiveRelationship {
                live_copy: Some(lc.clone()),
            }))
    }
}
