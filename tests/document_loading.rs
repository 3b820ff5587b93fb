// PDF and text loading through lopdf
use kirjuri::config::ExtractorConfig;
use kirjuri::document;
use kirjuri::extraction::{Mode, Pipeline};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;

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

    let mut kids: Vec<Object> = Vec::new();
    for line in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
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
fn test_pdf_pages_are_read_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("register.pdf");
    write_pdf(&path, &["Virtanen, Matti, Helsinki.", "Aho, Liisa, Oulu."]);

    assert_eq!(document::get_page_count(&path).unwrap(), 2);

    let text = document::load_text(&path).unwrap();
    let first = text.find("Virtanen").expect("first page text");
    let second = text.find("Aho").expect("second page text");
    assert!(first < second);
}

#[test]
fn test_pdf_through_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("register.pdf");
    write_pdf(&path, &["Virtanen, Matti, Helsinki.", "Korhonen, Barn, Tampere."]);

    let text = document::load_text(&path).unwrap();
    let pipeline = Pipeline::from_config(&ExtractorConfig::default()).unwrap();
    let result = pipeline.extract(&text, Mode::Structural);

    assert_eq!(result.accepted.len(), 1);
    assert_eq!(result.accepted[0].city, "Helsinki");
    assert_eq!(result.skipped.len(), 1);
}

