//! HTTP method vocabulary for `API` requests and `MOCK API` routes.

use serde::Serialize;

use super::registry::{LangItemInfo, item, lookup};

/// Stable identifier for supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Metadata entry for an HTTP method.
pub type HttpMethodInfo = LangItemInfo<HttpMethod>;

/// Registry of supported HTTP methods.
pub const HTTP_METHODS: &[HttpMethodInfo] = &[
    item(HttpMethod::Get, "GET", "HTTP GET"),
    item(HttpMethod::Post, "POST", "HTTP POST"),
    item(HttpMethod::Put, "PUT", "HTTP PUT"),
    item(HttpMethod::Patch, "PATCH", "HTTP PATCH"),
    item(HttpMethod::Delete, "DELETE", "HTTP DELETE"),
];

/// Resolve a method name to its stable id.
pub fn from_str(name: &str) -> Option<HttpMethod> {
    lookup(HTTP_METHODS, name.trim())
}
