//! Export sink for the current note list.
//!
//! Only JSON has defined behavior; image/document formats are placeholders.

use crate::model::note::Note;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// File name offered for JSON downloads.
pub const JSON_EXPORT_FILE_NAME: &str = "sitemap.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Downloadable export output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum ExportError {
    UnknownFormat(String),
    /// Format is recognized but has no implementation.
    Unsupported(ExportFormat),
    Serialize(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownFormat(value) => {
                write!(f, "unknown export format `{value}`; expected json|png|pdf")
            }
            Self::Unsupported(format) => {
                write!(f, "export as {} is not implemented yet", format.as_str())
            }
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Serializes `notes` for `format`.
///
/// JSON is the notes array verbatim; other formats return `Unsupported`.
pub fn export_notes(notes: &[Note], format: ExportFormat) -> Result<ExportArtifact, ExportError> {
    match format {
        ExportFormat::Json => Ok(ExportArtifact {
            file_name: JSON_EXPORT_FILE_NAME.to_string(),
            mime_type: "application/json",
            bytes: serde_json::to_vec(notes)?,
        }),
        other => {
            warn!(
                "event=export module=export status=unsupported format={}",
                other.as_str()
            );
            Err(ExportError::Unsupported(other))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExportFormat;

    #[test]
    fn parses_formats_case_insensitively() {
        assert_eq!("JSON".parse::<ExportFormat>().ok(), Some(ExportFormat::Json));
        assert_eq!(" pdf ".parse::<ExportFormat>().ok(), Some(ExportFormat::Pdf));
        assert!("svg".parse::<ExportFormat>().is_err());
    }
}
