//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully read and its path
/// parameters resolved.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        parts: http::request::Parts,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { parts, body, params }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/contact/{id}`, `req.param("id")` on `/contact/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Whether the declared content type is `application/json`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored and the media type is
    /// compared case-insensitively. A missing header is not JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
pub(crate) fn test_request(
    method: Method,
    path: &str,
    content_type: Option<&str>,
    body: &str,
    params: &[(&str, &str)],
) -> Request {
    let mut builder = http::Request::builder().method(method).uri(path);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    let (parts, ()) = builder.body(()).unwrap().into_parts();
    let params = params.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Request::new(parts, Bytes::copy_from_slice(body.as_bytes()), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_content_type_detection() {
        let json = |ct| test_request(Method::POST, "/", ct, "", &[]).is_json();
        assert!(json(Some("application/json")));
        assert!(json(Some("application/json; charset=utf-8")));
        assert!(json(Some("Application/JSON")));
        assert!(!json(Some("text/plain")));
        assert!(!json(Some("application/jsonx")));
        assert!(!json(None));
    }

    #[test]
    fn params_and_headers() {
        let req = test_request(Method::GET, "/contact/abc", Some("text/plain"), "", &[("id", "abc")]);
        assert_eq!(req.param("id"), Some("abc"));
        assert_eq!(req.param("other"), None);
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
        assert_eq!(req.path(), "/contact/abc");
        assert_eq!(req.method(), &Method::GET);
    }
}
