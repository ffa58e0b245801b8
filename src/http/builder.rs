//! Request classification against the document root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::http::request::Request;
use crate::http::response::Response;

/// File served for targets that end in `/`.
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// Turns parsed requests into responses for files under a document root.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    doc_root: PathBuf,
}

impl ResponseBuilder {
    /// Creates a builder for `doc_root`, which is canonicalized once here.
    pub fn new(doc_root: impl AsRef<Path>) -> io::Result<Self> {
        let doc_root = fs::canonicalize(doc_root)?;
        Ok(Self { doc_root })
    }

    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    /// Classifies `request` as 200 (regular file under the root) or 404.
    pub fn classify(&self, request: Request) -> Response {
        let Some(path) = self.resolve(&request.path) else {
            return Response::not_found();
        };

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Response::ok(request, path, &meta),
            _ => Response::not_found(),
        }
    }

    /// Maps a request target to a canonical path inside the document root.
    ///
    /// Returns `None` when the path does not exist or resolves outside the
    /// root, including through `..` segments or symlinks.
    pub fn resolve(&self, target: &str) -> Option<PathBuf> {
        let mut relative = target.trim_start_matches('/').to_string();
        if target.ends_with('/') {
            relative.push_str(DEFAULT_DOCUMENT);
        }

        let canonical = fs::canonicalize(self.doc_root.join(relative)).ok()?;
        canonical.starts_with(&self.doc_root).then_some(canonical)
    }
}
