// Document text loading - lopdf for PDFs, plain reads for text files
use lopdf::Document;
use log::{debug, warn};
use std::fs;
use std::path::Path;

use crate::types::{ExtractError, Result};

/// Per-page text of a document. `None` marks a page with no extractable
/// text (scanned image, empty page, undecodable content).
pub fn load_pages(path: &Path) -> Result<Vec<Option<String>>> {
    if is_pdf(path) {
        load_pdf_pages(path)
    } else {
        load_text_file(path).map(|text| vec![non_blank(text)])
    }
}

/// All non-empty pages joined by a single line break.
pub fn load_text(path: &Path) -> Result<String> {
    let pages = load_pages(path)?;
    let present = pages.iter().filter(|p| p.is_some()).count();
    debug!("{}: {} of {} pages carry text", path.display(), present, pages.len());
    Ok(join_pages(pages))
}

pub fn join_pages(pages: Vec<Option<String>>) -> String {
    pages.into_iter().flatten().collect::<Vec<_>>().join("\n")
}

pub fn get_page_count(path: &Path) -> Result<usize> {
    if is_pdf(path) {
        Ok(load_pdf(path)?.get_pages().len())
    } else {
        load_text_file(path).map(|_| 1)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn load_pdf(path: &Path) -> Result<Document> {
    Document::load(path).map_err(|e| ExtractError::Document {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn load_pdf_pages(path: &Path) -> Result<Vec<Option<String>>> {
    let document = load_pdf(path)?;
    let pages = document
        .get_pages()
        .keys()
        .map(|&number| match document.extract_text(&[number]) {
            Ok(text) => {
                let page = non_blank(text);
                if page.is_none() {
                    debug!("page {} has no text", number);
                }
                page
            }
            Err(e) => {
                warn!("skipping page {} of {}: {}", number, path.display(), e);
                None
            }
        })
        .collect();
    Ok(pages)
}

fn load_text_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ExtractError::Document {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_join_pages_skips_absent_pages() {
        let pages = vec![Some("yksi".to_string()), None, Some("kolme".to_string())];
        assert_eq!(join_pages(pages), "yksi\nkolme");
        assert_eq!(join_pages(vec![None, None]), "");
    }

    #[test]
    fn test_text_file_is_one_page() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Aho, Liisa, Oulu.").unwrap();

        assert_eq!(load_pages(file.path()).unwrap(), vec![Some("Aho, Liisa, Oulu.".to_string())]);
        assert_eq!(get_page_count(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_blank_text_file_has_no_pages_with_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "  \n\n ").unwrap();
        assert_eq!(load_text(file.path()).unwrap(), "");
    }

    #[test]
    fn test_missing_file_is_document_error() {
        let err = load_text(Path::new("/nonexistent/arkisto.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Document { .. }));
    }

    #[test]
    fn test_garbage_pdf_is_document_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        write!(file, "this is not a pdf").unwrap();
        let err = load_pages(file.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Document { .. }));
    }
}
