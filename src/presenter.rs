use crate::item::has_pdf_suffix;
use crate::{ExtractedItem, Language, SourceFormat, ANNOTATION_PLACEHOLDER_NAME};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// What the user gets to see after a successful extraction.
///
/// Links borrow the extracted bytes, so a `Presentation` lives no longer than
/// the item list it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation<'a> {
    /// Nothing was found; only a message is shown.
    NoneFound { message: String },
    /// A header line followed by one link per item.
    Downloads {
        header: String,
        links: Vec<DownloadLink<'a>>,
    },
}

/// A downloadable reference to one extracted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink<'a> {
    /// Download filename, always ending in `.pdf` and unique within its
    /// presentation.
    pub file_name: String,
    /// Link text, e.g. `"Download report.pdf"`.
    pub label: String,
    pub media_type: &'a str,
    pub content: &'a [u8],
}

/// Build the presentation for `items` extracted from a `format` document.
///
/// When two items would be saved under the same name, later ones get a
/// ` (1)`, ` (2)`, … counter before the `.pdf` suffix.
pub fn present(items: &[ExtractedItem], format: SourceFormat, language: Language) -> Presentation<'_> {
    if items.is_empty() {
        return Presentation::NoneFound {
            message: language.none_found(format.label()),
        };
    }

    let mut taken = HashSet::new();
    let links = items
        .iter()
        .map(|item| {
            let file_name = unique_name(download_name(&item.name), &mut taken);
            DownloadLink {
                label: language.download_label(&file_name),
                file_name,
                media_type: &item.media_type,
                content: &item.content,
            }
        })
        .collect();

    Presentation::Downloads {
        header: language.results_header().to_string(),
        links,
    }
}

/// Append `.pdf` unless `name` already ends with it (ignoring ASCII case).
///
/// Applied to every item regardless of its real type, DOCX objects included.
///
/// ```
/// # use embedextract::download_name;
/// assert_eq!(download_name("report.pdf"), "report.pdf");
/// assert_eq!(download_name("image.png"), "image.png.pdf");
/// assert_eq!(download_name(&download_name("image.png")), "image.png.pdf");
/// ```
pub fn download_name(name: &str) -> String {
    if has_pdf_suffix(name) {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// `file_name`, or the first `stem (n).pdf` whose saved name is still free.
/// Saved names are compared ignoring ASCII case.
fn unique_name(file_name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(safe_file_name(&file_name).to_ascii_lowercase()) {
        return file_name;
    }

    let (stem, suffix) = file_name.split_at(file_name.len() - ".pdf".len());
    let mut n = 1;
    loop {
        let candidate = format!("{stem} ({n}){suffix}");
        if taken.insert(safe_file_name(&candidate).to_ascii_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

impl Presentation<'_> {
    /// Plain-text rendering: header, then one line per link with its media
    /// type; or just the "none found" message.
    pub fn render_text(&self) -> String {
        match self {
            Presentation::NoneFound { message } => message.clone(),
            Presentation::Downloads { header, links } => {
                let mut out = header.clone();
                for link in links {
                    let _ = write!(
                        out,
                        "\n  📎 {} ({}, {} bytes)",
                        link.label,
                        link.media_type,
                        link.content.len()
                    );
                }
                out
            }
        }
    }

    pub fn links(&self) -> &[DownloadLink<'_>] {
        match self {
            Presentation::NoneFound { .. } => &[],
            Presentation::Downloads { links, .. } => links,
        }
    }
}

impl DownloadLink<'_> {
    /// Write the content to `dir/<file_name>`, creating `dir` if necessary.
    ///
    /// Only the final path component of the name is used, so an attachment
    /// called `../../x.pdf` still lands inside `dir`.
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> std::io::Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let dest = dir.join(safe_file_name(&self.file_name));
        std::fs::write(&dest, self.content)?;
        Ok(dest)
    }
}

fn safe_file_name(file_name: &str) -> String {
    file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .map(str::to_string)
        .unwrap_or_else(|| download_name(ANNOTATION_PLACEHOLDER_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        let mut taken = HashSet::new();
        raw.iter()
            .map(|name| unique_name(download_name(name), &mut taken))
            .collect()
    }

    #[test]
    fn colliding_names_get_a_counter() {
        assert_eq!(names(&["a", "a.pdf", "A.PDF"]), ["a.pdf", "a (1).pdf", "A (2).PDF"]);
        assert_eq!(
            names(&["nested/x.bin", "x.bin"]),
            ["nested/x.bin.pdf", "x.bin (1).pdf"]
        );
    }

    #[test]
    fn safe_file_name_keeps_last_component() {
        assert_eq!(safe_file_name("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(safe_file_name(r"C:\temp\a.pdf"), "a.pdf");
        assert_eq!(safe_file_name("dir/"), "embedded_file.bin.pdf");
    }
}
