//! Batch command - ICMS report for a folder of invoices.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use icms_core::text::{dehyphenate, document_id, text_file_name};
use icms_core::{
    run_batch, BatchReporter, DocumentError, DocumentFailure, FaturaParser, IcmsConfig,
    InvoiceText, PdfTextExtractor,
};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder searched recursively for invoice PDFs
    #[arg(required = true)]
    input_folder: PathBuf,

    /// Folder receiving the extracted text files and the ICMS report
    #[arg(required = true)]
    output_folder: PathBuf,

    /// Also process already extracted text files found in the input folder
    #[arg(long)]
    include_text: bool,

    /// Extract text again even when a text file already exists
    #[arg(long)]
    force: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input_folder.is_dir() {
        anyhow::bail!("Input folder not found: {}", args.input_folder.display());
    }
    fs::create_dir_all(&args.output_folder)?;

    let sources = discover(&args.input_folder, args.include_text)?;
    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        sources.len()
    );

    // Header goes out before any document so an unwritable destination fails early
    let report_path = config.report_path(&args.output_folder);
    let mut reporter = BatchReporter::create(&report_path, config.output.delimiter_byte()?)?;

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut texts = Vec::with_capacity(sources.len());
    for source in &sources {
        texts.push(acquire_text(source, &args, &config)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let documents = texts.into_iter().map(|text| text.and_then(load_text));
    let parser = FaturaParser::from_config(&config);
    run_batch(&parser, &mut reporter, documents)?;

    let summary = reporter.finish()?;

    println!();
    print!("{}", summary);
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        sources.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(summary.success.len()).green(),
        style(summary.errors.len()).red()
    );
    println!(
        "{} Report written to {}",
        style("✓").green(),
        report_path.display()
    );

    Ok(())
}

/// Invoice sources under `folder`, sorted by path.
fn discover(folder: &Path, include_text: bool) -> anyhow::Result<Vec<PathBuf>> {
    let mut extensions = vec!["pdf"];
    if include_text {
        extensions.push("txt");
    }

    let mut files = Vec::new();
    for extension in extensions {
        let pattern = folder.join("**").join(format!("*.{}", extension));
        let pattern = pattern.to_string_lossy();
        files.extend(glob(&pattern)?.filter_map(|r| r.ok()).filter(|p| p.is_file()));
    }

    files.sort();
    debug!("Discovered {} files under {}", files.len(), folder.display());
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Path of the text file holding the extracted text of `source`.
///
/// PDFs are extracted into the output folder unless a text file is already
/// there. Failing to read a PDF fails only that document; failing to write
/// the text file stops the batch.
fn acquire_text(
    source: &Path,
    args: &BatchArgs,
    config: &IcmsConfig,
) -> anyhow::Result<Result<PathBuf, DocumentFailure>> {
    if !is_pdf(source) {
        return Ok(Ok(source.to_path_buf()));
    }

    let target = args
        .output_folder
        .join(text_file_name(source, &config.pdf.text_extension));

    if target.exists() && config.pdf.skip_existing && !args.force {
        info!(
            "Skipping {}! Dest file {} already exists.",
            source.display(),
            target.display()
        );
        return Ok(Ok(target));
    }

    info!("Processing {}", source.display());
    let text = match extract_pdf_text(source) {
        Ok(text) => text,
        Err(error) => {
            warn!("Could not extract text from {}: {}", source.display(), error);
            return Ok(Err(DocumentFailure::new(document_id(source), error)));
        }
    };

    let text = if config.pdf.dehyphenate {
        dehyphenate(&text)
    } else {
        text
    };

    fs::write(&target, text)?;
    info!("Saving {} text to {}", source.display(), target.display());
    Ok(Ok(target))
}

fn extract_pdf_text(source: &Path) -> Result<String, DocumentError> {
    let data = fs::read(source).map_err(|e| DocumentError::Unreadable(e.to_string()))?;
    let text = PdfTextExtractor::text_from_bytes(&data)
        .map_err(|e| DocumentError::Unreadable(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(DocumentError::Unreadable(
            "no text layer (scanned PDF?)".to_string(),
        ));
    }
    Ok(text)
}

fn load_text(path: PathBuf) -> Result<InvoiceText, DocumentFailure> {
    let id = document_id(&path);
    match fs::read(&path) {
        Ok(bytes) => Ok(InvoiceText::new(id, String::from_utf8_lossy(&bytes))),
        Err(e) => Err(DocumentFailure::new(id, DocumentError::Unreadable(e.to_string()))),
    }
}
