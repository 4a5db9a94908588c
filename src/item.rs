/// Media type forced onto any item whose name ends in `.pdf`.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Media type used when nothing better is known.
pub const OCTET_STREAM: &str = "application/octet-stream";

// ── ExtractedItem ────────────────────────────────────────────────────────────

/// One attachment pulled out of a PDF or DOCX document.
///
/// Returned by [`crate::Extractor::extract`] and by the two format-specific
/// extractors. Content is never empty; entries without bytes are dropped
/// before an item is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    /// Display name. For PDF table entries this is the name-tree key, for
    /// annotations the file specification's filename, for DOCX the entry's
    /// base filename. It may lack an extension.
    pub name: String,

    /// The raw, decoded bytes.
    pub content: Vec<u8>,

    /// Best-effort MIME type.
    pub media_type: String,
}

impl ExtractedItem {
    /// Build an item, forcing [`PDF_MEDIA_TYPE`] when the name ends in `.pdf`.
    ///
    /// ```
    /// # use embedextract::ExtractedItem;
    /// let item = ExtractedItem::new("archive.pdf", vec![1], "application/zip");
    /// assert_eq!(item.media_type, "application/pdf");
    /// ```
    pub fn new(name: impl Into<String>, content: Vec<u8>, media_type: impl Into<String>) -> Self {
        let name = name.into();
        let media_type = if has_pdf_suffix(&name) {
            PDF_MEDIA_TYPE.to_string()
        } else {
            media_type.into()
        };
        Self {
            name,
            content,
            media_type,
        }
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Returns `true` when `name` ends in `.pdf`, ignoring ASCII case.
///
/// This is a name heuristic only; the bytes are never inspected.
///
/// ```
/// # use embedextract::has_pdf_suffix;
/// assert!(has_pdf_suffix("Report.PDF"));
/// assert!(!has_pdf_suffix("report.pdf.txt"));
/// ```
pub fn has_pdf_suffix(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(".pdf"))
}

/// Best-effort media type for a DOCX package entry, guessed from its name.
pub(crate) fn guess_media_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}
