//! Shared PDF parsing utilities used across multiple modules.

use lopdf::{Dictionary, Document, Object, StringFormat};

/// Indirect references are followed at most this many hops.
const MAX_REFERENCE_HOPS: usize = 8;

/// Follow indirect references until a direct object is reached.
///
/// Returns `None` for dangling references or overly long chains.
pub(crate) fn resolve<'a>(document: &'a Document, mut value: &'a Object) -> Option<&'a Object> {
    for _ in 0..MAX_REFERENCE_HOPS {
        match value {
            Object::Reference(id) => value = document.get_object(*id).ok()?,
            direct => return Some(direct),
        }
    }
    None
}

/// Resolve `value` and borrow it as a dictionary.
pub(crate) fn resolve_dict<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Dictionary> {
    resolve(document, value).and_then(|o| o.as_dict().ok())
}

/// Resolve `value` and borrow it as an array.
pub(crate) fn resolve_array<'a>(document: &'a Document, value: &'a Object) -> Option<&'a Vec<Object>> {
    resolve(document, value).and_then(|o| o.as_array().ok())
}

/// Decode a PDF text string.
///
/// UTF-16BE and UTF-8 byte order marks are honoured; otherwise valid UTF-8 is
/// kept as-is and anything else is read as PDFDocEncoding through lopdf's
/// table. Bytes PDFDocEncoding leaves undefined are dropped.
pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => {
            let raw = Object::String(bytes.to_vec(), StringFormat::Literal);
            lopdf::decode_text_string(&raw).unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

/// Extract a text string value from a PDF dictionary for a given key.
///
/// Returns `Some(String)` if the key exists and contains a non-empty string,
/// `None` otherwise.
pub(crate) fn extract_string_from_dict(
    document: &Document,
    dict: &Dictionary,
    key: &[u8],
) -> Option<String> {
    dict.get(key)
        .ok()
        .and_then(|v| resolve(document, v))
        .and_then(|v| v.as_str().ok())
        .map(decode_text_string)
        .filter(|s| !s.is_empty())
}

/// Read a name-valued entry as a MIME type string.
///
/// Names such as `/application#2Fxml` are normalised to `application/xml`.
pub(crate) fn extract_mime_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let raw = dict.get(key).ok()?.as_name().ok()?;
    let mime = String::from_utf8_lossy(raw)
        .replace("#2F", "/")
        .replace("#2f", "/")
        .to_ascii_lowercase();
    if mime.is_empty() {
        None
    } else {
        Some(mime)
    }
}
