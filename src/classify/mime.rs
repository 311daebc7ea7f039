//! Content-Type helpers

/// MIME essence to preferred file extension
///
/// `application/octet-stream` has no entry.
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("text/html", "html"),
    ("application/xhtml+xml", "xhtml"),
    ("text/plain", "txt"),
    ("text/csv", "csv"),
    ("application/csv", "csv"),
    ("text/xml", "xml"),
    ("application/xml", "xml"),
    ("application/json", "json"),
    ("application/pdf", "pdf"),
    ("application/rtf", "rtf"),
    ("application/msword", "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
    ("application/vnd.ms-excel", "xls"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsx",
    ),
    ("application/vnd.ms-powerpoint", "ppt"),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pptx",
    ),
    ("application/vnd.oasis.opendocument.spreadsheet", "ods"),
    ("application/vnd.oasis.opendocument.text", "odt"),
    ("application/zip", "zip"),
    ("application/x-zip-compressed", "zip"),
    ("application/gzip", "gz"),
    ("application/javascript", "js"),
    ("text/javascript", "js"),
    ("text/css", "css"),
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
];

/// Returns the lower-cased MIME essence (`type/subtype`) of a Content-Type value
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Guesses a file extension from a Content-Type header value
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    let essence = mime_essence(content_type);
    MIME_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == essence)
        .map(|(_, ext)| *ext)
}

/// Returns true for Content-Types that servers send for many kinds of file
///
/// Such a type does not override an extension already present in the URL:
/// CSV is often served as `text/plain` and OOXML documents as zip archives.
pub fn is_generic(content_type: &str) -> bool {
    matches!(
        mime_essence(content_type).as_str(),
        "text/plain" | "application/zip" | "application/x-zip-compressed"
    )
}

/// Returns true if the Content-Type denotes an HTML page
pub fn is_html(content_type: &str) -> bool {
    matches!(
        mime_essence(content_type).as_str(),
        "text/html" | "application/xhtml+xml"
    )
}
