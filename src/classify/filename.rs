//! Filename and file-type derivation for fetched resources

use crate::classify::mime::{extension_for_mime, is_generic};
use crate::config::is_valid_file_type;
use crate::url::path_basename;
use percent_encoding::percent_decode_str;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};
use url::Url;

/// Derives the filename of a resource
///
/// Candidates, in priority order:
/// 1. the `filename` parameter of `Content-Disposition`
/// 2. the URL path basename with an extension guessed from `Content-Type`
/// 3. the raw URL path basename
pub fn derive_filename(url: &Url, headers: &HeaderMap) -> String {
    if let Some(name) = header_str(headers, CONTENT_DISPOSITION).and_then(disposition_filename) {
        return name;
    }

    let basename = path_basename(url);

    if let Some(name) =
        header_str(headers, CONTENT_TYPE).and_then(|ct| synthetic_name(&basename, ct))
    {
        return name;
    }

    basename
}

/// Extracts the filename from a Content-Disposition header value
///
/// `filename*` (RFC 5987, percent-encoded) wins over `filename`. Directory
/// components are stripped. Returns None when neither parameter yields a
/// usable name.
pub fn disposition_filename(value: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in split_params(value).into_iter().skip(1) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let raw = raw.trim().trim_matches('"');
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(raw.to_string()),
            // charset'language'value
            "filename*" => {
                extended = raw
                    .rsplit('\'')
                    .next()
                    .map(|v| percent_decode_str(v).decode_utf8_lossy().into_owned())
            }
            _ => {}
        }
    }

    extended
        .or(plain)
        .map(|name| {
            name.rsplit(['/', '\\'])
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        })
        .filter(|name| !name.is_empty())
}

/// Splits a header value on `;` outside of double quotes
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (i, c) in value.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                params.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// Builds a name from the URL basename and the Content-Type
///
/// The extension guessed from the Content-Type is appended unless the
/// basename already ends in that type, or the Content-Type is generic and the
/// basename has a type of its own. `download.php` served as an Excel sheet
/// becomes `download.php.xls`. Returns None when the Content-Type gives no
/// extension.
fn synthetic_name(basename: &str, content_type: &str) -> Option<String> {
    let ext = extension_for_mime(content_type)?;

    match file_type(basename) {
        Some(existing) if existing == ext || is_generic(content_type) => {
            Some(basename.to_string())
        }
        Some(_) => Some(format!("{}.{}", basename, ext)),
        None => {
            let stem = if basename.is_empty() { "index" } else { basename };
            Some(format!("{}.{}", stem, ext))
        }
    }
}

/// Derives the file type from a filename
///
/// The last two dot-separated suffixes are inspected from the end; the first
/// one that is 1-5 ASCII alphanumerics and not purely numeric is the type,
/// lower-cased. `data.csv.1` is therefore `csv`, while `report` has no type.
pub fn file_type(name: &str) -> Option<String> {
    let mut parts = name.split('.');
    let stem = parts.next().unwrap_or_default();
    let suffixes: Vec<&str> = parts.collect();

    if stem.is_empty() && suffixes.len() < 2 {
        // dotfiles such as `.htaccess`
        return None;
    }

    suffixes
        .iter()
        .rev()
        .take(2)
        .find(|suffix| is_valid_file_type(suffix))
        .map(|suffix| suffix.to_ascii_lowercase())
}

fn header_str(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
