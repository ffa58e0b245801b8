//! MIME type detection based on file extensions.

use std::path::Path;

/// Content type used for extensions missing from the table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Returns the content type for a file extension (without the dot).
/// Matching ignores ASCII case.
///
/// ```
/// # use statica::http::mime::content_type_for;
/// assert_eq!(content_type_for("HTML"), "text/html; charset=utf-8");
/// assert_eq!(content_type_for("unknown"), "application/octet-stream");
/// ```
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        // Text
        "css" => "text/css; charset=utf-8",
        "htm" | "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "yaml" | "yml" => "text/yaml; charset=utf-8",

        // Application
        "json" => "application/json",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",

        // Image
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",

        // Audio / video
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        // Font
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Content type for a path, keyed by its final extension.
pub fn content_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(content_type_for)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_without_extension_uses_default() {
        assert_eq!(content_type_for_path(Path::new("/srv/www/LICENSE")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn only_last_extension_counts() {
        assert_eq!(content_type_for_path(Path::new("bundle.min.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type_for_path(Path::new("site.tar.gz")), "application/gzip");
    }
}
