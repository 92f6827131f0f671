// Dashboard files compiled into the binary, looked up by request path.

/// Path served for `GET /`.
pub const INDEX: &str = "index.html";

static ASSETS: &[(&str, &[u8])] = &[
    ("index.html", include_bytes!("../assets/index.html")),
    ("app.js", include_bytes!("../assets/app.js")),
    ("style.css", include_bytes!("../assets/style.css")),
];

/// Embedded bytes for `path` (no leading slash); `""` means [`INDEX`].
pub fn lookup(path: &str) -> Option<&'static [u8]> {
    let path = if path.is_empty() { INDEX } else { path };
    ASSETS
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, bytes)| *bytes)
}

/// Content type from the path's extension.
pub fn content_type(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
