//! CLI tool for extracting embedded attachments from PDF and DOCX documents.
//!
//! Picks one file, routes it by media type, prints the download links and
//! writes every attachment into the output directory.

use clap::Parser;
use embedextract::{
    present, DispatchError, Extractor, ExtractorConfig, Language, Presentation, SourceDocument,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "embedextract", version, about = "Extract embedded attachments from PDF and DOCX files")]
struct Cli {
    /// PDF or DOCX file to scan
    input: Option<PathBuf>,

    /// Directory the attachments are written to
    #[arg(short, long, default_value = "extracted_files")]
    output_dir: PathBuf,

    /// Declared media type; guessed from the file extension when omitted
    #[arg(long)]
    media_type: Option<String>,

    /// Language of user-facing messages (en, es)
    #[arg(long, default_value_t = Language::English)]
    lang: Language,

    /// Fail when a single attachment is larger than this many bytes
    #[arg(long, value_name = "BYTES")]
    max_size: Option<usize>,

    /// Only list the attachments, do not write them
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ExtractorConfig {
        max_item_size: cli.max_size,
        language: cli.lang,
    };

    if let Err(message) = run(&cli, config) {
        eprintln!("❌ {message}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Returns the user-facing message on failure.
fn run(cli: &Cli, config: ExtractorConfig) -> Result<(), String> {
    let language = config.language;

    let source = match &cli.input {
        Some(path) => {
            let source = SourceDocument::from_path(path).map_err(|e| {
                log::debug!("cannot read {}: {e}", path.display());
                DispatchError::from(e).user_message(language).to_string()
            })?;
            Some(match &cli.media_type {
                Some(media_type) => source.with_media_type(media_type.as_str()),
                None => source,
            })
        }
        None => None,
    };

    let extractor = Extractor::new(config);
    let extraction = extractor
        .extract(source.as_ref())
        .map_err(|e| e.user_message(language).to_string())?;

    let presentation = present(&extraction.items, extraction.format, language);
    println!("{}", presentation.render_text());

    if cli.list {
        return Ok(());
    }

    if let Presentation::Downloads { links, .. } = &presentation {
        for link in links {
            let dest = link.save_to(&cli.output_dir).map_err(|e| {
                log::debug!("cannot write {}: {e}", link.file_name);
                language.processing_failure().to_string()
            })?;
            println!("   💾 {}", dest.display());
        }
    }

    Ok(())
}
