use crate::{pdf_utils, ExtractError, Result};
use flate2::read::ZlibDecoder;
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::{self, Read};

/// A PDF file specification that actually carries an embedded file.
///
/// Built only by [`FileSpecParser`]; a specification without an embedded
/// stream never becomes a `FileSpec`, so later stages never deal with missing
/// content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileSpec {
    /// Best filename declared by the specification, if any.
    pub(crate) filename: Option<String>,

    /// Decoded stream bytes.
    pub(crate) content: Vec<u8>,

    /// Content type from the embedded stream's `/Subtype`, falling back to the
    /// specification's own `/Subtype`.
    pub(crate) declared_type: Option<String>,
}

/// Handles parsing of file specifications and extraction of embedded file data.
pub(crate) struct FileSpecParser<'a> {
    document: &'a Document,
}

impl<'a> FileSpecParser<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Parse a file-specification value into a [`FileSpec`].
    ///
    /// Layout of a file specification (PDF 32000-1 §7.11.3):
    ///
    /// ```text
    /// <<
    ///   /Type  /Filespec
    ///   /F     (ascii filename)
    ///   /UF    (unicode filename)          ← preferred
    ///   /Desc  (description)
    ///   /EF    <<
    ///              /F   <stream-ref>       ← the actual data stream
    ///              /UF  <stream-ref>       ← alternative key, same stream
    ///          >>
    /// >>
    /// ```
    ///
    /// Returns `Ok(None)` when the value is not a dictionary specification or
    /// has no embedded stream (a plain string spec only names an external
    /// file). A stream whose filters fail to decode is an error.
    ///
    /// `label` names the spec in errors and logs.
    pub(crate) fn parse(&self, label: &str, value: &Object) -> Result<Option<FileSpec>> {
        let spec_dict = match pdf_utils::resolve_dict(self.document, value) {
            Some(dict) => dict,
            None => {
                log::debug!("'{label}': file specification is not a dictionary, skipping");
                return Ok(None);
            }
        };

        let stream = match self.embedded_stream(spec_dict) {
            Some(stream) => stream,
            None => {
                log::debug!("'{label}': file specification has no embedded stream, skipping");
                return Ok(None);
            }
        };

        let content = self.decode_stream(label, stream)?;
        if content.is_empty() {
            log::debug!("'{label}': embedded stream is empty, skipping");
            return Ok(None);
        }

        Ok(Some(FileSpec {
            filename: self.best_filename(spec_dict),
            content,
            declared_type: pdf_utils::extract_mime_from_dict(&stream.dict, b"Subtype")
                .or_else(|| pdf_utils::extract_mime_from_dict(spec_dict, b"Subtype")),
        }))
    }

    /// Locate the embedded stream through `/EF`, which may be inline or (for
    /// some producers) an indirect reference. `/UF` is preferred over `/F`.
    fn embedded_stream<'d>(&'d self, spec_dict: &'d Dictionary) -> Option<&'d Stream> {
        let ef_dict = pdf_utils::resolve_dict(self.document, spec_dict.get(b"EF").ok()?)?;

        [b"UF" as &[u8], b"F"]
            .into_iter()
            .filter_map(|key| ef_dict.get(key).ok())
            .filter_map(|v| pdf_utils::resolve(self.document, v))
            .find_map(|o| o.as_stream().ok())
    }

    /// Unfiltered streams are returned verbatim. A lone `/FlateDecode` is
    /// inflated here so that corrupt or truncated data is reported; other
    /// filter chains go through lopdf.
    fn decode_stream(&self, label: &str, stream: &Stream) -> Result<Vec<u8>> {
        let fail = |reason: String| ExtractError::ExtractionError(label.into(), reason);

        let Ok(filter) = stream.dict.get(b"Filter") else {
            return Ok(stream.content.clone());
        };
        if stream.content.is_empty() {
            return Ok(Vec::new());
        }

        let filters: Vec<&[u8]> = match pdf_utils::resolve(self.document, filter) {
            Some(Object::Name(name)) => vec![name.as_slice()],
            Some(Object::Array(list)) => list
                .iter()
                .filter_map(|f| pdf_utils::resolve(self.document, f))
                .filter_map(|f| f.as_name().ok())
                .collect(),
            _ => return Err(fail("unreadable /Filter entry".into())),
        };

        match filters.as_slice() {
            [] => Ok(stream.content.clone()),
            [b"FlateDecode"] if stream.dict.get(b"DecodeParms").is_err() => {
                inflate(&stream.content).map_err(|e| fail(format!("FlateDecode: {e}")))
            }
            _ => {
                let decoded = stream.decompressed_content().map_err(|e| fail(e.to_string()))?;
                if decoded.is_empty() {
                    return Err(fail("filters produced no data".into()));
                }
                Ok(decoded)
            }
        }
    }

    /// Return the best available filename: `/UF` > `/F` > platform-specific keys.
    fn best_filename(&self, spec_dict: &Dictionary) -> Option<String> {
        [b"UF" as &[u8], b"F", b"Unix", b"DOS", b"Mac"]
            .into_iter()
            .find_map(|key| pdf_utils::extract_string_from_dict(self.document, spec_dict, key))
    }
}

/// Inflate a zlib stream. Corrupt blocks and data that stops before the end
/// of the stream are both errors.
fn inflate(raw: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(raw.len().saturating_mul(2));
    ZlibDecoder::new(raw).read_to_end(&mut out)?;
    Ok(out)
}
