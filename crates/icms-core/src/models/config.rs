//! Configuration structures for the ICMS audit pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IcmsError, Result};

/// Main configuration for the icms pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IcmsConfig {
    /// Invoice section scanning configuration.
    pub extraction: ExtractionConfig,

    /// Tax computation configuration.
    pub tax: TaxConfig,

    /// Report output configuration.
    pub output: OutputConfig,

    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,
}

/// How the mandatory categories are checked before computing the tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryPolicy {
    /// Fail only when every mandatory category is zero or absent.
    #[default]
    AnyPresent,
    /// Fail when any mandatory category is zero or absent.
    AllPresent,
}

/// Invoice section scanning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Text that opens the itemized block (case-insensitive).
    pub begin_marker: String,

    /// Text that closes the itemized block (case-insensitive).
    pub end_marker: String,

    /// Mandatory category check.
    pub mandatory_policy: MandatoryPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            begin_marker: "Composição da Fatura".to_string(),
            end_marker: "kWh".to_string(),
            mandatory_policy: MandatoryPolicy::default(),
        }
    }
}

/// Tax computation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxConfig {
    /// ICMS rate applied to both bases.
    pub icms_rate: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            icms_rate: Decimal::new(30, 2),
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// File name of the delimited report inside the output folder.
    pub csv_file_name: String,

    /// Field delimiter of the report.
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_file_name: "icms.csv".to_string(),
            delimiter: ';',
        }
    }
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Join words hyphenated across line breaks.
    pub dehyphenate: bool,

    /// Reuse an already extracted text file instead of reading the PDF again.
    pub skip_existing: bool,

    /// Extension of extracted text files.
    pub text_extension: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            dehyphenate: true,
            skip_existing: true,
            text_extension: "txt".to_string(),
        }
    }
}

impl OutputConfig {
    /// Delimiter as a single byte, as required by the CSV writer.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| IcmsError::Config(format!("delimiter must be ASCII: {:?}", self.delimiter)))
    }
}

impl IcmsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IcmsError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| IcmsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the report inside `output_dir`.
    pub fn report_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.output.csv_file_name)
    }
}
