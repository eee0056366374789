//! GraphQL transport.

use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{DefaultTransport, HttpMethod, HttpRequest, HttpTransport};
use crate::GraphqlError;

/// Request body of a GraphQL operation.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
}

/// A single entry of the `errors` array of a GraphQL response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlErrorEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// A GraphQL response document: `{ data, errors }`.
///
/// `data` is kept as an untyped JSON value; callers pick the root field they
/// asked for and decode only that part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlErrorEntry>,
}

impl GraphqlResponse {
    /// Build a response that only carries data.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Whether the server reported any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Look up a root field of `data`. Absent and `null` values both yield `None`.
    pub fn root_field(&self, name: &str) -> Option<&Value> {
        self.data
            .as_ref()
            .and_then(|data| data.get(name))
            .filter(|value| !value.is_null())
    }

    /// Join all error messages, for diagnostics.
    pub fn error_messages(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A client able to execute GraphQL query strings.
///
/// Execution is blocking. Timeouts, retries and authentication belong to the
/// implementation, not to callers.
pub trait GraphqlClient {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError>;
}

impl<T: GraphqlClient + ?Sized> GraphqlClient for &T {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        (**self).execute(query)
    }
}

impl<T: GraphqlClient + ?Sized> GraphqlClient for Box<T> {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        (**self).execute(query)
    }
}

impl<T: GraphqlClient + ?Sized> GraphqlClient for Rc<T> {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        (**self).execute(query)
    }
}

impl<T: GraphqlClient + ?Sized> GraphqlClient for Arc<T> {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        (**self).execute(query)
    }
}

/// GraphQL client speaking HTTP.
///
/// Operations are sent as a JSON `POST` by default. With [`HttpMethod::Get`]
/// the query travels in the `query` URL parameter, which lets CDNs cache
/// catalog reads.
pub struct HttpGraphqlClient<T = DefaultTransport> {
    transport: T,
    endpoint: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
}

impl HttpGraphqlClient {
    /// Create a client for the given endpoint URL on the target's transport.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_transport(endpoint, DefaultTransport::default())
    }
}

impl<T: HttpTransport> HttpGraphqlClient<T> {
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            method: HttpMethod::Post,
            headers: vec![("Accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Add a header sent with every operation.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Select the store view the catalog API answers for.
    pub fn with_store_code(self, store: impl Into<String>) -> Self {
        self.with_header("Store", store)
    }

    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The HTTP request carrying `query`.
    pub fn build_request(&self, query: &str) -> Result<HttpRequest, GraphqlError> {
        let mut headers = self.headers.clone();
        let (url, body) = match self.method {
            HttpMethod::Get => {
                let separator = if self.endpoint.contains('?') { '&' } else { '?' };
                let url = format!("{}{}query={}", self.endpoint, separator, urlencoding::encode(query));
                (url, None)
            }
            HttpMethod::Post => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                let body = serde_json::to_vec(&GraphqlRequest { query })?;
                (self.endpoint.clone(), Some(body))
            }
        };

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body,
        })
    }
}

impl<T: HttpTransport> GraphqlClient for HttpGraphqlClient<T> {
    fn execute(&self, query: &str) -> Result<GraphqlResponse, GraphqlError> {
        let request = self.build_request(query)?;
        let response = self.transport.send(request)?.into_success()?;

        let parsed: GraphqlResponse = response.json()?;
        if parsed.has_errors() {
            tracing::debug!(
                endpoint = %self.endpoint,
                errors = %parsed.error_messages(),
                "GraphQL response carries errors"
            );
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::FetchError;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_response_decoding() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": { "products": { "items": [{ "sku": "ABC" }] } },
            "errors": [{ "message": "partial failure", "path": ["products"] }]
        }))
        .unwrap();

        assert!(response.has_errors());
        assert_eq!(response.error_messages(), "partial failure");
        assert_eq!(
            response.root_field("products").unwrap()["items"][0]["sku"],
            "ABC"
        );
    }

    #[test]
    fn test_root_field_null_and_missing() {
        let response = GraphqlResponse::with_data(json!({ "categoryList": null }));
        assert!(response.root_field("categoryList").is_none());
        assert!(response.root_field("products").is_none());
        assert!(GraphqlResponse::default().root_field("products").is_none());
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_string(&GraphqlRequest { query: "{a}" }).unwrap();
        assert_eq!(body, r#"{"query":"{a}"}"#);
    }

    struct RecordingTransport {
        requests: RefCell<Vec<HttpRequest>>,
        reply: HttpResponse,
    }

    impl RecordingTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                reply: HttpResponse::new(status, body),
            }
        }
    }

    impl HttpTransport for &RecordingTransport {
        fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.requests.borrow_mut().push(request);
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_post_operation() {
        let transport = RecordingTransport::replying(200, r#"{"data":{"products":{"items":[]}}}"#);
        let client = HttpGraphqlClient::with_transport("https://shop.example/graphql", &transport)
            .with_store_code("default");

        let response = client.execute("{a}").unwrap();
        assert!(response.root_field("products").is_some());

        let requests = transport.requests.borrow();
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://shop.example/graphql");
        assert_eq!(request.header("Store"), Some("default"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(br#"{"query":"{a}"}"#.as_slice()));
    }

    #[test]
    fn test_get_operation() {
        let transport = RecordingTransport::replying(200, r#"{"data":null}"#);
        let client = HttpGraphqlClient::with_transport("https://shop.example/graphql", &transport)
            .with_method(HttpMethod::Get);

        client.execute("{a b}").unwrap();
        let requests = transport.requests.borrow();
        assert_eq!(requests[0].url, "https://shop.example/graphql?query=%7Ba%20b%7D");
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn test_get_query_parameter_encoding() {
        let transport = RecordingTransport::replying(200, "{}");
        let client = HttpGraphqlClient::with_transport("https://shop.example/graphql?store=de", &transport)
            .with_method(HttpMethod::Get);

        let request = client
            .build_request(r#"{products(filter:{url_key:{eq:"bag-1.~x"}}){items{sku}}}"#)
            .unwrap();
        assert_eq!(
            request.url,
            "https://shop.example/graphql?store=de&query=%7Bproducts%28filter%3A%7Burl_key%3A%7Beq%3A%22bag-1.~x%22%7D%7D%29%7Bitems%7Bsku%7D%7D%7D"
        );
        assert_eq!(request.method, HttpMethod::Get);
    }

    #[test]
    fn test_http_failure() {
        let transport = RecordingTransport::replying(503, "maintenance");
        let client = HttpGraphqlClient::with_transport("https://shop.example/graphql", &transport);
        assert!(matches!(
            client.execute("{a}"),
            Err(GraphqlError::Fetch(FetchError::Status { status: 503, .. }))
        ));
    }

    #[test]
    fn test_non_graphql_body() {
        let transport = RecordingTransport::replying(200, "<html></html>");
        let client = HttpGraphqlClient::with_transport("https://shop.example/graphql", &transport);
        assert!(client.execute("{a}").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_client_reports_transport_error() {
        let client = HttpGraphqlClient::new("https://shop.example/graphql")
            .with_bearer_token("t0k3n");
        assert!(matches!(client.execute("{x}"), Err(GraphqlError::Fetch(FetchError::Send(_)))));
    }
}
