use crate::file_discovery::{FileSpecDiscovery, SpecSource};
use crate::file_parsing::FileSpecParser;
use crate::item::OCTET_STREAM;
use crate::{ExtractedItem, ExtractorConfig, Result};
use lopdf::Document;
use std::path::Path;

/// Name given to an annotation attachment whose file specification declares
/// no filename.
pub const ANNOTATION_PLACEHOLDER_NAME: &str = "embedded_file.bin";

// ── PdfExtractor ─────────────────────────────────────────────────────────────

/// Extracts document-level and annotation-level attachments from a PDF.
///
/// # Creating an extractor
///
/// ```no_run
/// use embedextract::{ExtractorConfig, PdfExtractor};
///
/// // From a file path
/// let a = PdfExtractor::from_path("report.pdf").unwrap();
///
/// // From an in-memory buffer
/// let bytes = std::fs::read("report.pdf").unwrap();
/// let a = PdfExtractor::from_bytes(&bytes).unwrap();
///
/// // With custom configuration
/// let cfg = ExtractorConfig {
///     max_item_size: Some(10 * 1024 * 1024),
///     ..Default::default()
/// };
/// let a = PdfExtractor::with_config(&bytes, cfg).unwrap();
/// ```
pub struct PdfExtractor {
    document: Document,
    config: ExtractorConfig,
}

impl PdfExtractor {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Load a PDF from the file system.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            document: Document::load(path)?,
            config: ExtractorConfig::default(),
        })
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::with_config(data, ExtractorConfig::default())
    }

    /// Load a PDF from an in-memory byte slice with a custom [`ExtractorConfig`].
    pub fn with_config(data: &[u8], config: ExtractorConfig) -> Result<Self> {
        Ok(Self {
            document: Document::load_mem(data)?,
            config,
        })
    }

    // ── Extraction ────────────────────────────────────────────────────────────

    /// Extract every attachment from the document.
    ///
    /// Document-level attachments come first, in name-tree order, followed by
    /// annotation attachments page by page. File specifications without an
    /// embedded stream are skipped; a stream that fails to decode fails the
    /// whole call. A document without attachments yields an empty list.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use embedextract::PdfExtractor;
    ///
    /// let extractor = PdfExtractor::from_path("report.pdf").unwrap();
    /// for item in extractor.extract().unwrap() {
    ///     println!("{} — {} bytes ({})", item.name, item.content.len(), item.media_type);
    /// }
    /// ```
    pub fn extract(&self) -> Result<Vec<ExtractedItem>> {
        let parser = FileSpecParser::new(&self.document);
        let mut items = Vec::new();

        for candidate in FileSpecDiscovery::new(&self.document).collect() {
            let label = match &candidate.source {
                SpecSource::NameTree { key } => key.clone(),
                SpecSource::Annotation { page } => format!("annotation on page {page}"),
            };

            let Some(spec) = parser.parse(&label, candidate.value)? else {
                continue;
            };

            let item = match candidate.source {
                SpecSource::NameTree { key } => ExtractedItem::new(
                    key,
                    spec.content,
                    spec.declared_type.unwrap_or_else(|| OCTET_STREAM.into()),
                ),
                SpecSource::Annotation { .. } => ExtractedItem::new(
                    spec.filename
                        .unwrap_or_else(|| ANNOTATION_PLACEHOLDER_NAME.into()),
                    spec.content,
                    OCTET_STREAM,
                ),
            };

            self.config.check_item_size(&item)?;
            log::debug!("found '{}' ({} bytes) in {label}", item.name, item.len());
            items.push(item);
        }

        Ok(items)
    }

    /// Returns the number of attachments [`extract`](Self::extract) yields.
    pub fn count_attachments(&self) -> Result<usize> {
        Ok(self.extract()?.len())
    }

    /// Returns `Ok(true)` when the document carries at least one attachment.
    pub fn has_attachments(&self) -> Result<bool> {
        Ok(self.count_attachments()? > 0)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Returns a reference to the active [`ExtractorConfig`].
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}
