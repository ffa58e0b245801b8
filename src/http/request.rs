use std::collections::HashMap;

/// HTTP request methods.
///
/// Only GET is served. Any other method token is rejected by the parser
/// before a `Request` is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use statica::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
        }
    }
}

/// Normalizes a header name to its canonical form.
///
/// Each hyphen-delimited segment gets an uppercase first letter and the
/// rest lowercased, so `content-TYPE` becomes `Content-Type`.
///
/// ```
/// # use statica::http::request::canonical_header_key;
/// assert_eq!(canonical_header_key("content-TYPE"), "Content-Type");
/// assert_eq!(canonical_header_key("x-a-b"), "X-A-B");
/// ```
pub fn canonical_header_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut upper = true;

    for c in name.chars() {
        if upper {
            key.push(c.to_ascii_uppercase());
        } else {
            key.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }

    key
}

/// Header storage keyed by canonical header name.
///
/// Names are canonicalized once when inserted. Lookups compare with plain
/// equality, so callers pass the canonical spelling (`"Content-Type"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    inner: HashMap<String, String>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any previous value under the same
    /// canonical name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.inner.insert(canonical_header_key(name), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(|v| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries ordered by name, ascending.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (k, v) in iter {
            map.insert(k.as_ref(), v);
        }
        map
    }
}

/// Represents a parsed HTTP request from a client.
///
/// `Host` and `Connection` are hoisted out of `headers` into `host` and
/// `close`; `headers` never contains either key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (always GET)
    pub method: Method,
    /// The literal request target (e.g. "/index.html" or "/docs/")
    pub path: String,
    /// HTTP version, always "HTTP/1.1"
    pub version: String,
    /// Remaining request headers
    pub headers: HeaderMap,
    /// Value of the Host header
    pub host: String,
    /// Whether the client sent `Connection: close`
    pub close: bool,
}

impl Request {
    /// Determines whether the connection may remain open after the
    /// response. HTTP/1.1 defaults to persistent connections.
    pub fn keep_alive(&self) -> bool {
        !self.close
    }
}
