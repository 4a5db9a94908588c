//! Embedded-object extraction from DOCX packages.
//!
//! A DOCX file is a zip container; OLE objects and other embedded packages
//! are stored as plain entries under `word/embeddings/`.

use crate::item::guess_media_type;
use crate::{ExtractError, ExtractedItem, ExtractorConfig, Result};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Folder inside the package that holds embedded objects.
pub const EMBEDDINGS_DIR: &str = "word/embeddings/";

/// Extracts package-embedded objects from a DOCX file held in memory.
pub struct DocxExtractor<'a> {
    data: &'a [u8],
    config: ExtractorConfig,
}

impl<'a> DocxExtractor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, ExtractorConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: ExtractorConfig) -> Self {
        Self { data, config }
    }

    /// Read every file entry under [`EMBEDDINGS_DIR`], in archive order.
    ///
    /// Each item is named after the entry's base filename. A package without
    /// the folder yields an empty list. An entry that cannot be read is
    /// skipped with a warning; an archive that cannot be opened at all is an
    /// error.
    ///
    /// ```no_run
    /// use embedextract::DocxExtractor;
    ///
    /// let bytes = std::fs::read("letter.docx").unwrap();
    /// for item in DocxExtractor::new(&bytes).extract().unwrap() {
    ///     println!("{} ({} bytes)", item.name, item.content.len());
    /// }
    /// ```
    pub fn extract(&self) -> Result<Vec<ExtractedItem>> {
        let mut archive = ZipArchive::new(Cursor::new(self.data))?;
        let mut items = Vec::new();

        for i in 0..archive.len() {
            // Directory entries end in '/' and have no base name.
            let Some(path) = archive.name_for_index(i).map(str::to_owned) else {
                continue;
            };
            let Some(name) = embedded_object_name(&path) else {
                continue;
            };

            let mut entry = match archive.by_index(i) {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping '{path}': {e}");
                    continue;
                }
            };

            if let Some(limit) = self.config.max_item_size {
                let size = usize::try_from(entry.size()).unwrap_or(usize::MAX);
                if size > limit {
                    return Err(ExtractError::FileSizeExceeded {
                        name: name.to_string(),
                        size,
                        limit,
                    });
                }
            }

            let mut content = Vec::new();
            if let Err(e) = entry.read_to_end(&mut content) {
                log::warn!("skipping '{path}': {e}");
                continue;
            }
            if content.is_empty() {
                log::debug!("skipping empty entry '{path}'");
                continue;
            }

            let item = ExtractedItem::new(name, content, guess_media_type(name));
            self.config.check_item_size(&item)?;
            items.push(item);
        }

        if items.is_empty() {
            log::debug!("no entries under {EMBEDDINGS_DIR}");
        }

        Ok(items)
    }
}

/// Base filename of an entry inside the embeddings folder, or `None` for
/// entries elsewhere in the package.
fn embedded_object_name(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(EMBEDDINGS_DIR)?;
    rest.rsplit('/').next().filter(|name| !name.is_empty())
}
