//! HTTP and GraphQL transport for TurboCommerce catalog access.
//!
//! The catalog is read through a GraphQL API. This crate provides the
//! [`GraphqlClient`] seam used by the retrievers in `turbo-commerce`, an HTTP
//! implementation over a pluggable [`HttpTransport`] (Spin outbound HTTP on
//! `wasm32`), and an in-memory client for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use turbo_data::{GraphqlClient, HttpGraphqlClient, HttpMethod};
//!
//! let client = HttpGraphqlClient::new("https://shop.example/graphql")
//!     .with_method(HttpMethod::Get)
//!     .with_store_code("default");
//!
//! let response = client.execute("{products(filter:{sku:{eq:\"MJ01\"}}){items{sku}}}")?;
//! let products = response.root_field("products");
//! ```

mod error;
mod graphql;
pub mod http;
mod memory;

pub use error::{FetchError, GraphqlError};
pub use graphql::{GraphqlClient, GraphqlErrorEntry, GraphqlRequest, GraphqlResponse, HttpGraphqlClient};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use memory::InMemoryGraphqlClient;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FetchError, GraphqlClient, GraphqlError, GraphqlResponse, HttpGraphqlClient, HttpMethod,
        HttpTransport, InMemoryGraphqlClient,
    };
}
