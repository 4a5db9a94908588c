//! Minimal program that lists and saves every attachment of a PDF or DOCX file.
//!
//! Usage:
//!   cargo run --example extract_attachments -- report.pdf
//!   cargo run --example extract_attachments -- letter.docx ./output

use embedextract::{present, Extractor, Presentation, SourceDocument};
use std::{env, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_or_docx> [output_dir]", args[0]);
        process::exit(1);
    }

    let source = SourceDocument::from_path(&args[1]).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {e}", args[1]);
        process::exit(1);
    });
    let output_dir = args.get(2).map(String::as_str).unwrap_or(".");

    let extractor = Extractor::default();
    let language = extractor.config().language;

    let extraction = extractor.extract(Some(&source)).unwrap_or_else(|e| {
        eprintln!("{} ({e})", e.user_message(language));
        process::exit(1);
    });

    let shown = present(&extraction.items, extraction.format, language);
    println!("{}", shown.render_text());

    if let Presentation::Downloads { links, .. } = &shown {
        for link in links {
            match link.save_to(output_dir) {
                Ok(path) => println!("  ✓ Saved to {}", path.display()),
                Err(e) => eprintln!("  ✗ Save failed: {e}"),
            }
        }
    }
}
