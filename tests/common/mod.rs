// In-memory fixture builders shared by the integration tests.
#![allow(dead_code)]

use flate2::{write::ZlibEncoder, Compression};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── PDF ──────────────────────────────────────────────────────────────────────

struct Attachment {
    key: String,
    content: Vec<u8>,
    subtype: Option<String>,
    /// Store `content` as-is under this `/Filter` instead of the builder's
    /// compression setting.
    raw_filter: Option<String>,
}

struct Annotation {
    filename: Option<String>,
    content: Option<Vec<u8>>,
}

/// Builds a small PDF with an `/EmbeddedFiles` name tree and
/// `/FileAttachment` annotations.
pub struct PdfBuilder {
    attachments: Vec<Attachment>,
    pages: Vec<Vec<Annotation>>,
    split_name_tree: bool,
    compress: bool,
    utf16_text: bool,
    inline: bool,
    root_in_own_kids: bool,
}

impl PdfBuilder {
    pub fn new(page_count: usize) -> Self {
        Self {
            attachments: Vec::new(),
            pages: (0..page_count.max(1)).map(|_| Vec::new()).collect(),
            split_name_tree: false,
            compress: false,
            utf16_text: false,
            inline: false,
            root_in_own_kids: false,
        }
    }

    /// Document-level attachment stored in the name tree under `key`.
    pub fn attachment(mut self, key: &str, content: &[u8], subtype: Option<&str>) -> Self {
        self.attachments.push(Attachment {
            key: key.into(),
            content: content.to_vec(),
            subtype: subtype.map(str::to_owned),
            raw_filter: None,
        });
        self
    }

    /// Document-level attachment whose stream holds `raw` verbatim and claims
    /// to be encoded with `filter`.
    pub fn raw_attachment(mut self, key: &str, raw: &[u8], filter: &str) -> Self {
        self.attachments.push(Attachment {
            key: key.into(),
            content: raw.to_vec(),
            subtype: None,
            raw_filter: Some(filter.into()),
        });
        self
    }

    /// FileAttachment annotation on `page` (0-based).
    pub fn annotation(mut self, page: usize, filename: Option<&str>, content: &[u8]) -> Self {
        self.pages[page].push(Annotation {
            filename: filename.map(str::to_owned),
            content: Some(content.to_vec()),
        });
        self
    }

    /// FileAttachment annotation whose file specification has no `/EF`.
    pub fn external_annotation(mut self, page: usize, filename: &str) -> Self {
        self.pages[page].push(Annotation {
            filename: Some(filename.into()),
            content: None,
        });
        self
    }

    /// Put every attachment in its own `/Kids` leaf instead of one root node.
    pub fn split_name_tree(mut self) -> Self {
        self.split_name_tree = true;
        self
    }

    /// Flate-compress embedded streams.
    pub fn compress(mut self) -> Self {
        self.compress = true;
        self
    }

    /// Write name-tree keys and filenames as UTF-16BE strings with a BOM.
    pub fn utf16_text(mut self) -> Self {
        self.utf16_text = true;
        self
    }

    /// Store the `/EmbeddedFiles` root, file specifications and annotations
    /// as direct objects. Only streams stay indirect.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Make the name-tree root list itself in its own `/Kids`.
    pub fn root_in_own_kids(mut self) -> Self {
        self.root_in_own_kids = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for annotations in &self.pages {
            let mut annots = Vec::new();
            for annotation in annotations {
                let stream_id = annotation
                    .content
                    .as_ref()
                    .map(|content| embedded_stream(&mut doc, content, None, self.compress));
                let fs = self.file_spec(&mut doc, annotation.filename.as_deref(), stream_id);
                let annot = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "FileAttachment",
                    "Rect" => rect(0, 0, 16, 16),
                    "FS" => fs,
                };
                annots.push(self.place(&mut doc, annot));
            }

            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => rect(0, 0, 612, 792),
            };
            if !annots.is_empty() {
                page.set("Annots", annots);
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        if !self.attachments.is_empty() {
            let mut pairs = Vec::new();
            for attachment in &self.attachments {
                let stream_id = match &attachment.raw_filter {
                    Some(filter) => raw_stream(&mut doc, &attachment.content, filter),
                    None => embedded_stream(
                        &mut doc,
                        &attachment.content,
                        attachment.subtype.as_deref(),
                        self.compress,
                    ),
                };
                let fs = self.file_spec(&mut doc, Some(&attachment.key), Some(stream_id));
                pairs.push((self.text(&attachment.key), fs));
            }

            let root = if self.split_name_tree {
                let leaves: Vec<Object> = pairs
                    .into_iter()
                    .map(|(key, fs)| Object::Reference(doc.add_object(dictionary! { "Names" => vec![key, fs] })))
                    .collect();
                dictionary! { "Kids" => leaves }
            } else {
                let names: Vec<Object> = pairs.into_iter().flat_map(|(key, fs)| [key, fs]).collect();
                dictionary! { "Names" => names }
            };

            let tree = if self.root_in_own_kids {
                let root_id = doc.new_object_id();
                let mut root = root;
                root.set("Kids", vec![Object::Reference(root_id)]);
                doc.objects.insert(root_id, Object::Dictionary(root));
                Object::Reference(root_id)
            } else {
                self.place(&mut doc, root)
            };

            catalog.set("Names", dictionary! { "EmbeddedFiles" => tree });
        }

        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    /// `dict` as a direct object when building inline, otherwise a reference
    /// to a new indirect object.
    fn place(&self, doc: &mut Document, dict: Dictionary) -> Object {
        if self.inline {
            Object::Dictionary(dict)
        } else {
            Object::Reference(doc.add_object(dict))
        }
    }

    fn text(&self, s: &str) -> Object {
        if self.utf16_text {
            let mut bytes = vec![0xFE, 0xFF];
            bytes.extend(s.encode_utf16().flat_map(u16::to_be_bytes));
            Object::String(bytes, StringFormat::Hexadecimal)
        } else {
            Object::string_literal(s)
        }
    }

    fn file_spec(&self, doc: &mut Document, filename: Option<&str>, stream_id: Option<ObjectId>) -> Object {
        let mut dict = Dictionary::new();
        dict.set("Type", "Filespec");
        if let Some(filename) = filename {
            dict.set("F", self.text(filename));
            dict.set("UF", self.text(filename));
        }
        if let Some(stream_id) = stream_id {
            dict.set("EF", dictionary! { "F" => stream_id });
        }
        self.place(doc, dict)
    }
}

fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<Object> {
    vec![
        Object::Integer(x0),
        Object::Integer(y0),
        Object::Integer(x1),
        Object::Integer(y1),
    ]
}

fn embedded_stream(doc: &mut Document, content: &[u8], subtype: Option<&str>, compress: bool) -> ObjectId {
    let mut dict = dictionary! { "Type" => "EmbeddedFile" };
    if let Some(subtype) = subtype {
        dict.set("Subtype", Object::Name(subtype.as_bytes().to_vec()));
    }
    let mut stream = Stream::new(dict, content.to_vec());
    if compress {
        stream.compress().unwrap();
    }
    doc.add_object(stream)
}

fn raw_stream(doc: &mut Document, raw: &[u8], filter: &str) -> ObjectId {
    let dict = dictionary! {
        "Type" => "EmbeddedFile",
        "Filter" => Object::Name(filter.as_bytes().to_vec()),
    };
    doc.add_object(Stream::new(dict, raw.to_vec()).with_compression(false))
}

/// zlib-compress `data` the way a PDF writer fills a `/FlateDecode` stream.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

// ── DOCX ─────────────────────────────────────────────────────────────────────

/// Builds a zip package with a minimal `word/document.xml` plus the given
/// entries. Paths ending in `/` become directory entries.
pub struct DocxBuilder {
    entries: Vec<(String, Vec<u8>)>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, path: &str, content: &[u8]) -> Self {
        self.entries.push((path.into(), content.to_vec()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><w:document/>"#).unwrap();

        for (path, content) in &self.entries {
            if path.ends_with('/') {
                zip.add_directory(path.as_str(), options).unwrap();
            } else {
                zip.start_file(path.as_str(), options).unwrap();
                zip.write_all(content).unwrap();
            }
        }

        zip.finish().unwrap().into_inner()
    }
}

/// Flip every compressed byte of the entry stored under `path`, leaving the
/// zip headers intact so the archive still opens.
pub fn corrupt_entry(zip: &mut [u8], path: &str) {
    let name = path.as_bytes();
    let at = zip
        .windows(name.len())
        .position(|w| w == name)
        .expect("entry present in archive");
    let header = at - 30;
    assert_eq!(&zip[header..header + 4], b"PK\x03\x04", "local file header");

    let u16_at = |i: usize| u16::from_le_bytes([zip[i], zip[i + 1]]) as usize;
    let compressed = u32::from_le_bytes(zip[header + 18..header + 22].try_into().unwrap()) as usize;
    let start = header + 30 + u16_at(header + 26) + u16_at(header + 28);

    for byte in &mut zip[start..start + compressed] {
        *byte ^= 0xFF;
    }
}
