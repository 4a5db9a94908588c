use crate::item::{OCTET_STREAM, PDF_MEDIA_TYPE};
use crate::Result;
use std::fmt;
use std::path::Path;

/// Declared media type of an Office Open XML word-processing package.
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// ── SourceDocument ───────────────────────────────────────────────────────────

/// The user-selected file: its bytes plus the media type it was declared with.
///
/// Extraction only ever borrows a `SourceDocument`.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub data: Vec<u8>,
    pub media_type: String,
    /// Original file name, when known. Used for log context only.
    pub name: Option<String>,
}

impl SourceDocument {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
            name: None,
        }
    }

    /// Read a file fully into memory and declare its media type from the
    /// extension, falling back to `application/octet-stream`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(OCTET_STREAM)
            .to_string();
        Ok(Self {
            data,
            media_type,
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
        })
    }

    /// Replace the declared media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// The format this document routes to, if any.
    pub fn format(&self) -> Option<SourceFormat> {
        SourceFormat::from_media_type(&self.media_type)
    }
}

// ── SourceFormat ─────────────────────────────────────────────────────────────

/// The two container formats the dispatcher knows how to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    Docx,
}

impl SourceFormat {
    /// Match a declared media type. Parameters (`; charset=…`) and case are
    /// ignored.
    ///
    /// ```
    /// # use embedextract::SourceFormat;
    /// assert_eq!(SourceFormat::from_media_type("Application/PDF"), Some(SourceFormat::Pdf));
    /// assert_eq!(SourceFormat::from_media_type("text/plain"), None);
    /// ```
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        if essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
            Some(SourceFormat::Pdf)
        } else if essence.eq_ignore_ascii_case(DOCX_MEDIA_TYPE) {
            Some(SourceFormat::Docx)
        } else {
            None
        }
    }

    /// Label used in the "none found" message.
    pub fn label(self) -> &'static str {
        match self {
            SourceFormat::Pdf => "PDF",
            SourceFormat::Docx => "DOCX",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
