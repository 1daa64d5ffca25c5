//! File text extraction for plain text, PDF and Word documents

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported file kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Plain text file
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
}

impl FileKind {
    /// Detect file kind from a filename's extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Multi-format text extractor
pub struct FileParser;

impl FileParser {
    /// Extract UTF-8 text from a file's bytes based on its extension
    pub fn extract(filename: &str, data: &[u8]) -> Result<String> {
        let kind = FileKind::from_filename(filename)
            .ok_or_else(|| Error::validation(format!("Unsupported file type: {}", filename)))?;

        let text = match kind {
            FileKind::Txt => Self::parse_text(data),
            FileKind::Pdf => Self::parse_pdf(filename, data)?,
            FileKind::Docx => Self::parse_docx(filename, data)?,
        };

        tracing::debug!("Extracted {} chars from '{}'", text.chars().count(), filename);
        Ok(text)
    }

    /// Parse plain text
    fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }

    /// Parse PDF document
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;
        Ok(cleanup_pdf_text(&text))
    }

    /// Parse DOCX document; paragraphs are joined with a space
    fn parse_docx(filename: &str, data: &[u8]) -> Result<String> {
        let doc = docx_rs::read_docx(data).map_err(|e| Error::extraction(filename, e.to_string()))?;

        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut text = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(text);
            }
        }

        Ok(paragraphs.join(" "))
    }
}

/// Replace typographic ligatures pdf fonts commonly emit
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace('\u{00A0}', " ")
}
