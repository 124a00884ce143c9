// PDF engine boundary. The rest of the crate only sees "open bytes, count
// pages, ask for one page's text".

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("{0}")]
    Load(String),

    #[error("{0}")]
    Page(String),

    #[error("{0}")]
    Panicked(String),
}

/// A document opened by a [`PdfEngine`].
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Text of the page at `index` (0-based, document order). `Ok(None)`
    /// means the page has no text layer at all.
    fn page_text(&self, index: usize) -> Result<Option<String>, PdfError>;
}

pub trait PdfEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PdfError>;
}

/// Page-at-a-time extraction on top of `lopdf`.
pub struct LopdfEngine;

struct LopdfDocument {
    doc: lopdf::Document,
    page_numbers: Vec<u32>,
}

impl PdfEngine for LopdfEngine {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PdfError> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| PdfError::Load(e.to_string()))?;
        let page_numbers = doc.get_pages().into_keys().collect();
        Ok(Box::new(LopdfDocument { doc, page_numbers }))
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<Option<String>, PdfError> {
        let page_number = self
            .page_numbers
            .get(index)
            .copied()
            .ok_or_else(|| PdfError::Page(format!("page index {} out of range", index)))?;
        self.doc
            .extract_text(&[page_number])
            .map(Some)
            .map_err(|e| PdfError::Page(e.to_string()))
    }
}

/// Text pulled from a document, best effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTexts {
    pub page_count: usize,
    /// Trimmed, non-empty page texts in page order.
    pub texts: Vec<String>,
}

impl PageTexts {
    pub fn joined(&self) -> String {
        self.texts.join(" ")
    }
}

/// Opens `bytes` with `engine` and collects the text of every page it can.
///
/// Failure to open is an error. A page that errors or panics is skipped and
/// leaves no trace in the result beyond a debug log line.
pub fn extract_pages(engine: &dyn PdfEngine, bytes: &[u8]) -> Result<PageTexts, PdfError> {
    let document = guarded(|| engine.open(bytes))?;
    let page_count = document.page_count();

    let mut texts = Vec::new();
    for index in 0..page_count {
        match guarded(|| document.page_text(index)) {
            Ok(Some(text)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    texts.push(trimmed.to_string());
                }
            }
            Ok(None) => {}
            Err(e) => {
                debug!(engine = engine.name(), page = index + 1, error = %e, "Skipping page");
            }
        }
    }

    Ok(PageTexts { page_count, texts })
}

fn guarded<T>(f: impl FnOnce() -> Result<T, PdfError>) -> Result<T, PdfError> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(PdfError::Panicked(format!("PDF library panicked: {}", detail)))
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::pdf_with_pages;
    use super::*;

    struct FlakyDocument {
        pages: Vec<Result<Option<&'static str>, &'static str>>,
    }

    impl PdfDocument for FlakyDocument {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, index: usize) -> Result<Option<String>, PdfError> {
            match &self.pages[index] {
                Ok(text) => Ok(text.map(str::to_string)),
                Err("panic") => panic!("broken content stream"),
                Err(msg) => Err(PdfError::Page(msg.to_string())),
            }
        }
    }

    struct FlakyEngine;

    impl PdfEngine for FlakyEngine {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn open(&self, bytes: &[u8]) -> Result<Box<dyn PdfDocument>, PdfError> {
            if bytes == b"explode" {
                panic!("cannot parse xref");
            }
            Ok(Box::new(FlakyDocument {
                pages: vec![
                    Ok(Some("  first  ")),
                    Err("bad font"),
                    Err("panic"),
                    Ok(None),
                    Ok(Some("   ")),
                    Ok(Some("last\n")),
                ],
            }))
        }
    }

    #[test]
    fn failing_pages_are_skipped() {
        let pages = extract_pages(&FlakyEngine, b"%PDF-1.5").unwrap();
        assert_eq!(pages.page_count, 6);
        assert_eq!(pages.texts, vec!["first", "last"]);
        assert_eq!(pages.joined(), "first last");
    }

    #[test]
    fn panic_during_open_becomes_error() {
        let err = extract_pages(&FlakyEngine, b"explode").unwrap_err();
        assert!(matches!(err, PdfError::Panicked(_)));
        assert!(err.to_string().contains("cannot parse xref"));
    }

    #[test]
    fn lopdf_reads_pages_in_order() {
        let bytes = pdf_with_pages(&[Some("Hello"), Some("World")]);
        let pages = extract_pages(&LopdfEngine, &bytes).unwrap();
        assert_eq!(pages.page_count, 2);
        assert_eq!(pages.joined(), "Hello World");
    }

    #[test]
    fn lopdf_rejects_garbage() {
        let err = extract_pages(&LopdfEngine, b"this is not a pdf").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn lopdf_counts_pages_without_text() {
        let bytes = pdf_with_pages(&[Some("Hello"), None, Some("World")]);
        let pages = extract_pages(&LopdfEngine, &bytes).unwrap();
        assert_eq!(pages.page_count, 3);
        assert_eq!(pages.joined(), "Hello World");
    }
}
