//! In-process test client
//!
//! Routes requests straight to registered handlers, without a socket. Paths
//! are matched exactly after the query string is stripped; anything else
//! answers `404`.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

/// HTTP method understood by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl Method {
    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request handed to a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    body: String,
}

impl Request {
    fn new(method: Method, target: &str, body: impl Into<String>) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method,
            path: path.to_string(),
            query,
            body: body.into(),
        }
    }

    /// Request method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path without the query string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string, if any
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Request body
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Response returned by a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl Response {
    /// Response with an explicit status
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK`
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    /// `404 Not Found`
    pub fn not_found() -> Self {
        Self::with_status(404, "not found")
    }
}

/// Request handler
pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// Builder for [`Client`]
#[derive(Default)]
pub struct ClientBuilder {
    routes: FxHashMap<String, Handler>,
}

impl ClientBuilder {
    /// Route `path` to `handler`; a later route for the same path replaces it
    pub fn route<F>(mut self, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.routes.insert(path.into(), Arc::new(handler));
        self
    }

    /// Finish building
    pub fn build(self) -> Client {
        Client {
            routes: Arc::new(self.routes),
        }
    }
}

/// In-process HTTP-like client
///
/// Cloning is cheap; clones share the route table.
#[derive(Clone, Default)]
pub struct Client {
    routes: Arc<FxHashMap<String, Handler>>,
}

impl Client {
    /// Client with no routes; every request answers `404`
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Issue a GET
    pub fn get(&self, target: &str) -> Response {
        self.request(Method::Get, target, "")
    }

    /// Issue a POST
    pub fn post(&self, target: &str, body: impl Into<String>) -> Response {
        self.request(Method::Post, target, body)
    }

    /// Issue a request
    pub fn request(&self, method: Method, target: &str, body: impl Into<String>) -> Response {
        let request = Request::new(method, target, body);
        let response = match self.routes.get(request.path()) {
            Some(handler) => handler(&request),
            None => Response::not_found(),
        };
        debug!(
            method = %method,
            path = request.path(),
            status = response.status,
            "Handled test request"
        );
        response
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("paths", &self.paths())
            .finish()
    }
}
