//! Per-run summary buckets.

use std::fmt;

use serde::Serialize;

/// Informational, success and error entries of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// General information about the run.
    pub info: Vec<String>,
    /// Identifiers of documents that produced a row.
    pub success: Vec<String>,
    /// Identifiers of failed documents, with diagnostics.
    pub errors: Vec<String>,
}

impl BatchSummary {
    pub const INFO_HEADING: &'static str = "RESUMO GERAL";
    pub const SUCCESS_HEADING: &'static str = "SUCESSO";
    pub const ERROR_HEADING: &'static str = "ERROS DE PROCESSAMENTO";

    pub fn new() -> Self {
        Self::default()
    }

    /// The three buckets with their headings, in output order.
    pub fn sections(&self) -> [(&'static str, &[String]); 3] {
        [
            (Self::INFO_HEADING, &self.info),
            (Self::SUCCESS_HEADING, &self.success),
            (Self::ERROR_HEADING, &self.errors),
        ]
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (heading, entries)) in self.sections().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", heading)?;
            for entry in entries.iter() {
                writeln!(f, "    {}", entry)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_orders_sections() {
        let summary = BatchSummary {
            info: vec!["2 arquivos a processar".to_string()],
            success: vec!["jan".to_string()],
            errors: vec!["fev (invoice section not found)".to_string()],
        };

        assert_eq!(
            summary.to_string(),
            "RESUMO GERAL\n    2 arquivos a processar\n\nSUCESSO\n    jan\n\nERROS DE PROCESSAMENTO\n    fev (invoice section not found)\n"
        );
        assert!(summary.has_errors());
    }

    #[test]
    fn test_empty_sections_keep_headings() {
        assert_eq!(
            BatchSummary::new().to_string(),
            "RESUMO GERAL\n\nSUCESSO\n\nERROS DE PROCESSAMENTO\n"
        );
    }
}
