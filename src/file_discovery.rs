use crate::pdf_utils;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;

/// Name trees deeper than this are treated as malformed.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// Where a file specification was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SpecSource {
    /// An entry of the `/EmbeddedFiles` name tree, keyed by its name.
    NameTree { key: String },
    /// A `/FileAttachment` annotation on the given 1-based page.
    Annotation { page: u32 },
}

/// An unparsed file specification and where it came from.
#[derive(Debug, Clone)]
pub(crate) struct SpecCandidate<'a> {
    pub(crate) source: SpecSource,
    pub(crate) value: &'a Object,
}

/// Handles discovery of embedded file specifications from PDF documents.
///
/// File specifications are found from two sources, returned in this order:
/// 1. The /Names/EmbeddedFiles name tree in the document catalog
/// 2. /FileAttachment annotations on pages, page 1 first
pub(crate) struct FileSpecDiscovery<'a> {
    document: &'a Document,
}

impl<'a> FileSpecDiscovery<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self { document }
    }

    /// Every file specification in the document, name-tree entries first.
    pub(crate) fn collect(&self) -> Vec<SpecCandidate<'a>> {
        let mut specs = self.collect_from_names_tree();
        specs.extend(self.collect_from_annotations());
        specs
    }

    /// Collect file specifications from the document's names tree.
    pub(crate) fn collect_from_names_tree(&self) -> Vec<SpecCandidate<'a>> {
        let mut out = Vec::new();

        let Some((root, root_id)) = self.embedded_files_root() else {
            return out;
        };

        // A /Kids entry pointing back at the root must not walk it again.
        let mut visited: HashSet<ObjectId> = root_id.into_iter().collect();
        self.walk_name_tree(root, 0, &mut visited, &mut out);
        out
    }

    /// `/Root /Names /EmbeddedFiles`, each step inline or by reference, with
    /// the root node's object id when it is an indirect object.
    fn embedded_files_root(&self) -> Option<(&'a Dictionary, Option<ObjectId>)> {
        let catalog = self.document.catalog().ok()?;
        let names = pdf_utils::resolve_dict(self.document, catalog.get(b"Names").ok()?)?;
        let value = names.get(b"EmbeddedFiles").ok()?;
        let root_id = value.as_reference().ok();
        Some((pdf_utils::resolve_dict(self.document, value)?, root_id))
    }

    /// Recursively walk a PDF name tree, collecting `(key, value)` pairs from
    /// the `/Names` array of every node and then descending into `/Kids`.
    fn walk_name_tree(
        &self,
        node: &'a Dictionary,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
        out: &mut Vec<SpecCandidate<'a>>,
    ) {
        if depth > MAX_NAME_TREE_DEPTH {
            log::warn!("name tree deeper than {MAX_NAME_TREE_DEPTH} levels, ignoring the rest");
            return;
        }

        // Leaf node: /Names is [key, value, key, value, …]
        if let Some(pairs) = node
            .get(b"Names")
            .ok()
            .and_then(|v| pdf_utils::resolve_array(self.document, v))
        {
            out.extend(self.process_names_array(pairs));
        }

        // Intermediate node: /Kids is an array of (usually indirect) nodes
        let Some(kids) = node
            .get(b"Kids")
            .ok()
            .and_then(|v| pdf_utils::resolve_array(self.document, v))
        else {
            return;
        };

        for kid in kids {
            if let Object::Reference(id) = kid {
                if !visited.insert(*id) {
                    log::warn!("name tree node {id:?} visited twice, skipping cycle");
                    continue;
                }
            }
            if let Some(kid_dict) = pdf_utils::resolve_dict(self.document, kid) {
                self.walk_name_tree(kid_dict, depth + 1, visited, out);
            }
        }
    }

    /// Turn a names array into candidates. A trailing key without a value is
    /// ignored.
    fn process_names_array(&self, names: &'a [Object]) -> Vec<SpecCandidate<'a>> {
        names
            .chunks_exact(2)
            .filter_map(|pair| {
                let key = pdf_utils::resolve(self.document, &pair[0])?.as_str().ok()?;
                Some(SpecCandidate {
                    source: SpecSource::NameTree {
                        key: pdf_utils::decode_text_string(key),
                    },
                    value: &pair[1],
                })
            })
            .collect()
    }

    /// Collect file specifications from page FileAttachment annotations, in
    /// page order and then annotation order.
    pub(crate) fn collect_from_annotations(&self) -> Vec<SpecCandidate<'a>> {
        self.document
            .get_pages()
            .into_iter()
            .flat_map(|(page_number, page_id)| self.process_page_annotations(page_number, page_id))
            .collect()
    }

    /// Process annotations on a single page.
    fn process_page_annotations(&self, page_number: u32, page_id: ObjectId) -> Vec<SpecCandidate<'a>> {
        let Ok(page_dict) = self.document.get_dictionary(page_id) else {
            return Vec::new();
        };

        let Some(annots) = page_dict
            .get(b"Annots")
            .ok()
            .and_then(|v| pdf_utils::resolve_array(self.document, v))
        else {
            return Vec::new();
        };

        annots
            .iter()
            .filter_map(|annot| pdf_utils::resolve_dict(self.document, annot))
            .filter_map(Self::file_attachment_spec)
            .map(|value| SpecCandidate {
                source: SpecSource::Annotation { page: page_number },
                value,
            })
            .collect()
    }

    /// The `/FS` value of a FileAttachment annotation.
    fn file_attachment_spec(annot: &'a Dictionary) -> Option<&'a Object> {
        let subtype = annot.get(b"Subtype").ok()?.as_name().ok()?;
        if subtype != b"FileAttachment" {
            return None;
        }
        annot.get(b"FS").ok()
    }
}
