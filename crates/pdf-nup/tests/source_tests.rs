mod common;

use common::write_test_pdf;
use pdf_nup::*;
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("five.pdf");
    write_test_pdf(&path, 5);

    let source = load_source(&path).await.unwrap();
    assert_eq!(source.page_count, 5);
    assert_eq!(source.path, path);
    assert_eq!(source.base_name(), "five");
}

#[tokio::test]
async fn test_load_sources_keeps_failures_separate() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    write_test_pdf(&good, 3);
    std::fs::write(&bad, b"this is not a pdf").unwrap();

    let results = load_sources(&[&good, &bad]).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap().page_count, 3);
    match &results[1] {
        Err(NupError::SourceOpen { path, .. }) => assert_eq!(path, &bad),
        other => panic!("Expected SourceOpen error, got {other:?}"),
    }
}

#[test]
fn test_output_path() {
    let source = PageSource {
        path: PathBuf::from("/in/Chapter 1.pdf"),
        page_count: 1,
    };
    assert_eq!(
        source.output_path("/out"),
        PathBuf::from("/out/Chapter 1_editado.pdf")
    );
}

#[test]
fn test_registry_with_real_files() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_test_pdf(&a, 2);
    write_test_pdf(&b, 4);

    let mut registry = DocumentRegistry::new();
    let missing = dir.path().join("missing.pdf");
    let results = registry.register_all(&[&a, &missing, &b]);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    let b_id = *results[2].as_ref().unwrap();

    assert_eq!(registry.len(), 2);
    registry.move_page(b_id, 0, 3).unwrap();

    let items = registry.batch_items();
    assert_eq!(items[0].source.page_count, 2);
    assert_eq!(items[0].page_order, None);
    assert_eq!(items[1].page_order, Some(vec![1, 2, 3, 0]));
}
