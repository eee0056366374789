//! In-memory GraphQL client (for development/testing).

use std::cell::RefCell;

use serde_json::Value;

use crate::{GraphqlClient, GraphqlError, GraphqlResponse};

#[derive(Debug, Clone)]
enum Outcome {
    Body(Value),
    Failure(String),
}

impl Outcome {
    fn resolve(&self) -> Result<GraphqlResponse, GraphqlError> {
        match self {
            Outcome::Body(body) => Ok(serde_json::from_value(body.clone())?),
            Outcome::Failure(message) => Err(GraphqlError::Client(message.clone())),
        }
    }
}

/// GraphQL client answering from canned response bodies.
///
/// Responses are chosen by the first registered needle contained in the
/// query string, falling back to the default body. Every executed query is
/// recorded in order.
#[derive(Debug)]
pub struct InMemoryGraphqlClient {
    routes: Vec<(String, Outcome)>,
    fallback: Outcome,
    executed: RefCell<Vec<String>>,
}

impl Default for InMemoryGraphqlClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGraphqlClient {
    /// A client that answers every query with `{"data": null}`.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: Outcome::Body(serde_json::json!({ "data": null })),
            executed: RefCell::new(Vec::new()),
        }
    }

    /// Answer every unmatched query with this response body.
    pub fn with_response(mut self, body: Value) -> Self {
        self.fallback = Outcome::Body(body);
        self
    }

    /// Answer queries containing `needle` with this response body.
    pub fn with_response_for(mut self, needle: impl Into<String>, body: Value) -> Self {
        self.routes.push((needle.into(), Outcome::Body(body)));
        self
    }

    /// Fail every unmatched query with a client error.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fallback = Outcome::Failure(message.into());
        self
    }

    /// Number of executed queries.
    pub fn execute_count(&self) -> usize {
        self.executed.borrow().len()
    }

    /// All executed queries, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    /// The most recently executed query.
    pub fn last_query(&self) -> Option<String> {
        self.executed.borrow().last().cloned()
    }
}

impl GraphqlClient for InMemoryGraphqlClient {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        self.executed.borrow_mut().push(query.to_string());

        self.routes
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, outcome)| outcome)
            .unwrap_or(&self.fallback)
            .resolve()
    }
}
