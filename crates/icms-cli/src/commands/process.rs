//! Process command - category breakdown and ICMS of a single invoice.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use icms_core::text::{dehyphenate, document_id};
use icms_core::{Category, FaturaParser, InvoiceParser, ParsedFatura, PdfTextExtractor};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary
    Text,
    /// JSON output
    Json,
}

pub fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());
    let text = read_text(&args.input, config.pdf.dehyphenate)?;

    let parser = FaturaParser::from_config(&config);
    let parsed = parser.parse(&document_id(&args.input), &text)?;

    let output = match args.format {
        OutputFormat::Text => format_text(&parsed),
        OutputFormat::Json => serde_json::to_string_pretty(&parsed)?,
    };
    println!("{}", output);

    if !parsed.section_closed {
        eprintln!(
            "{} End marker not found; amounts were read up to the end of the text.",
            style("⚠").yellow()
        );
    }

    Ok(())
}

fn read_text(path: &Path, dehyphenate_pdf: bool) -> anyhow::Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if !is_pdf {
        return Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned());
    }

    let text = PdfTextExtractor::text_from_bytes(&fs::read(path)?)?;
    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from PDF");
    }

    Ok(if dehyphenate_pdf {
        dehyphenate(&text)
    } else {
        text
    })
}

fn format_text(parsed: &ParsedFatura) -> String {
    let mut output = String::new();
    let result = &parsed.result;

    output.push_str(&format!("Documento: {}\n\n", result.document_id));

    for category in Category::ALL {
        let marker = if parsed.values.contains(category) { "" } else { " (ausente)" };
        output.push_str(&format!(
            "  {:<14} {:>12.2}{}\n",
            category.label(),
            parsed.values.get(category),
            marker
        ));
    }

    output.push('\n');
    output.push_str(&format!("ICMS original:  {:>12.2}\n", result.original_tax));
    output.push_str(&format!("ICMS reduzido:  {:>12.2}\n", result.reduced_tax));
    output.push_str(&format!("Diferença:      {:>12.2}\n", result.difference));

    output
}
