//! # embedextract
//!
//! A Rust library for pulling embedded attachments out of PDF and DOCX documents.
//!
//! ## What this crate does
//!
//! 1. **Dispatch**: looks at the declared media type of a [`SourceDocument`] and
//!    routes it to the PDF or the DOCX extractor.
//! 2. **PDF attachments**: walks the `/EmbeddedFiles` name tree, then every
//!    page's annotations, and decodes each embedded file stream.
//! 3. **DOCX embedded objects**: opens the package as a zip archive and reads
//!    every entry under `word/embeddings/`.
//! 4. **Present**: turns the extracted items into download links (or a
//!    "none found" message) in the configured [`Language`].
//!
//! ## Quick example
//!
//! ```no_run
//! use embedextract::{present, Extractor, Presentation, SourceDocument};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SourceDocument::from_path("report.pdf")?;
//! let extractor = Extractor::default();
//!
//! match extractor.extract(Some(&source)) {
//!     Ok(extraction) => {
//!         let shown = present(&extraction.items, extraction.format, extractor.config().language);
//!         if let Presentation::Downloads { links, .. } = &shown {
//!             for link in links {
//!                 link.save_to("./out")?;
//!             }
//!         }
//!         println!("{}", shown.render_text());
//!     }
//!     Err(e) => eprintln!("{}", e.user_message(extractor.config().language)),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

mod dispatcher;
mod docx;
mod file_discovery;
mod file_parsing;
mod item;
mod messages;
mod pdf_extractor;
mod pdf_utils;
mod presenter;
mod source;

pub use dispatcher::{Extraction, Extractor};
pub use docx::{DocxExtractor, EMBEDDINGS_DIR};
pub use item::{has_pdf_suffix, ExtractedItem, OCTET_STREAM, PDF_MEDIA_TYPE};
pub use messages::Language;
pub use pdf_extractor::{PdfExtractor, ANNOTATION_PLACEHOLDER_NAME};
pub use presenter::{download_name, present, DownloadLink, Presentation};
pub use source::{SourceDocument, SourceFormat, DOCX_MEDIA_TYPE};

// ── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration shared by the dispatcher and both extractors.
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    /// If set, extraction fails with [`ExtractError::FileSizeExceeded`] as soon
    /// as any single item exceeds this byte count.
    pub max_item_size: Option<usize>,

    /// Language used for user-facing messages and presenter text.
    pub language: Language,
}

impl ExtractorConfig {
    /// Fails with [`ExtractError::FileSizeExceeded`] when `item` is larger
    /// than `max_item_size`.
    pub fn check_item_size(&self, item: &ExtractedItem) -> Result<()> {
        match self.max_item_size {
            Some(limit) if item.len() > limit => Err(ExtractError::FileSizeExceeded {
                name: item.name.clone(),
                size: item.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

// ── Error types ──────────────────────────────────────────────────────────────

/// Every failure an extractor can produce.
///
/// The dispatcher folds all of these into [`DispatchError::ProcessingFailure`].
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A filesystem I/O error occurred (loading a source or saving a download).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The underlying lopdf parser returned an error.
    #[error("PDF parse error: {0}")]
    ParseError(#[from] lopdf::Error),

    /// The DOCX container is not a readable zip archive.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An embedded file was found but its stream could not be decoded.
    #[error("Failed to extract embedded file '{0}': {1}")]
    ExtractionError(String, String),

    /// An extracted item exceeds the configured `max_item_size` limit.
    #[error("embedded file '{name}' is {size} bytes, over the {limit} byte limit")]
    FileSizeExceeded {
        name: String,
        size: usize,
        limit: usize,
    },
}

/// Failures surfaced at the dispatch boundary.
///
/// `Display` keeps the full diagnostic; [`DispatchError::user_message`] gives
/// the text meant for the person who picked the file.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The flow was triggered without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// The declared media type is neither PDF nor DOCX.
    #[error("unsupported media type: {0:?}")]
    UnsupportedFormat(String),

    /// Parsing or extraction failed; any items found so far are discarded.
    #[error("processing failed: {0}")]
    ProcessingFailure(#[from] ExtractError),
}

impl DispatchError {
    /// User-facing text for this error in `language`.
    pub fn user_message(&self, language: Language) -> &'static str {
        match self {
            DispatchError::NoFileSelected => language.no_file_selected(),
            DispatchError::UnsupportedFormat(_) => language.unsupported_format(),
            DispatchError::ProcessingFailure(_) => language.processing_failure(),
        }
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ExtractError>;
