use crate::{
    DispatchError, DocxExtractor, ExtractedItem, ExtractorConfig, PdfExtractor, SourceDocument,
    SourceFormat,
};

/// A successful extraction run: what was opened and everything found in it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub format: SourceFormat,
    pub items: Vec<ExtractedItem>,
}

/// Routes a [`SourceDocument`] to the right extractor by its declared media
/// type.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract every attachment from `source`.
    ///
    /// `None` means the user triggered the flow without picking a file. Any
    /// failure inside an extractor becomes [`DispatchError::ProcessingFailure`]
    /// and nothing found before the failure is returned.
    pub fn extract(&self, source: Option<&SourceDocument>) -> Result<Extraction, DispatchError> {
        let source = source.ok_or(DispatchError::NoFileSelected)?;
        let label = source.name.as_deref().unwrap_or("<unnamed>");

        let format = source.format().ok_or_else(|| {
            log::info!("{label}: unsupported media type {:?}", source.media_type);
            DispatchError::UnsupportedFormat(source.media_type.clone())
        })?;

        let result = match format {
            SourceFormat::Pdf => PdfExtractor::with_config(&source.data, self.config.clone())
                .and_then(|extractor| extractor.extract()),
            SourceFormat::Docx => {
                DocxExtractor::with_config(&source.data, self.config.clone()).extract()
            }
        };

        match result {
            Ok(items) => {
                log::info!("{label}: {} embedded file(s) in {format}", items.len());
                Ok(Extraction { format, items })
            }
            Err(e) => {
                log::debug!("{label}: failed to process {format}: {e}");
                Err(DispatchError::ProcessingFailure(e))
            }
        }
    }
}
