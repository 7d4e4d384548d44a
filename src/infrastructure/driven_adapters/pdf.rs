//! PDF Text Extractor
//!
//! Extracts book text page by page with `lopdf`.

use std::path::Path;

use lopdf::Document;

use crate::domain::gateways::TextExtractor;

/// Pages with less text than this are probably scanned images
const SPARSE_PAGE_CHARS: usize = 100;
const PROGRESS_EVERY: usize = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Option<String> {
        let document = Document::load(path)
            .inspect_err(|e| {
                tracing::error!(file = %path.display(), error = %e, "Failed to open PDF");
            })
            .ok()?;

        let pages = document.get_pages();
        let total = pages.len();
        tracing::info!(file = %path.display(), pages = total, "Extracting text from PDF");

        let mut page_texts = Vec::with_capacity(total);
        for (index, page_number) in pages.keys().enumerate() {
            let position = index + 1;
            match document.extract_text(&[*page_number]) {
                Ok(page_text) => {
                    let chars = page_text.trim().chars().count();
                    if chars < SPARSE_PAGE_CHARS {
                        tracing::warn!(page = position, chars, "Page contains very little text");
                    }
                    page_texts.push(page_text.trim_end().to_string());
                }
                Err(e) => tracing::warn!(page = position, error = %e, "Failed to extract page text"),
            }

            if position % PROGRESS_EVERY == 0 || position == total {
                tracing::info!(page = position, total, "Processed pages");
            }
        }

        let text = page_texts.join("\n").trim().to_string();
        if text.is_empty() {
            tracing::warn!(file = %path.display(), "No text extracted from PDF");
            return None;
        }

        tracing::info!(
            file = %path.display(),
            pages = total,
            chars = text.chars().count(),
            "Extracted PDF text"
        );
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Write a PDF with one page per entry of `pages`
    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let kids: Vec<Object> = pages
            .iter()
            .map(|text| {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 24.into()]),
                        Operation::new("Td", vec![100.into(), 600.into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                };
                let content_id =
                    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "Contents" => content_id,
                })
                .into()
            })
            .collect();

        let count = i64::try_from(kids.len()).unwrap();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn pages_are_joined_with_a_single_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.pdf");
        write_pdf(&path, &["Hello page one", "Second page text"]);

        let text = PdfTextExtractor::new().extract_text(&path);

        assert_eq!(text.as_deref(), Some("Hello page one\nSecond page text"));
    }

    #[test]
    fn blank_document_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.pdf");
        write_pdf(&path, &["   "]);

        assert!(PdfTextExtractor::new().extract_text(&path).is_none());
    }

    #[test]
    fn missing_file_yields_none() {
        let extractor = PdfTextExtractor::new();
        assert!(extractor
            .extract_text(Path::new("/definitely/not/here.pdf"))
            .is_none());
    }

    #[test]
    fn garbage_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();

        assert!(PdfTextExtractor::new().extract_text(&path).is_none());
    }
}
