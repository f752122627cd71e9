use pdf_nup::*;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let options = NupOptions::default();
    assert_eq!(options.paper, PaperSize::A4);
    assert_eq!(options.orientation, Orientation::Portrait);
    assert_eq!(options.pages_per_sheet, 1);
    assert_eq!(options.spacing_cm, 0.17);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut options = NupOptions::default();

    options.pages_per_sheet = 0;
    match options.validate() {
        Err(NupError::Config(msg)) => assert!(msg.contains("Pages per sheet")),
        _ => panic!("Expected Config error"),
    }
    options.pages_per_sheet = 4;

    options.spacing_cm = -0.5;
    assert!(options.validate().is_err());
    options.spacing_cm = f32::INFINITY;
    assert!(options.validate().is_err());
    options.spacing_cm = 0.0;
    assert!(options.validate().is_ok());

    options.output_dpi = 0;
    assert!(options.validate().is_err());
    options.output_dpi = 150;

    options.paper = PaperSize::Custom {
        width_cm: 10.0,
        height_cm: 0.0,
    };
    assert!(options.validate().is_err());
    options.paper = PaperSize::Custom {
        width_cm: 10.0,
        height_cm: 15.0,
    };
    assert!(options.validate().is_ok());
}

#[test]
fn test_spacing_too_large_for_sheet() {
    let options = NupOptions {
        paper: PaperSize::Custom {
            width_cm: 5.0,
            height_cm: 5.0,
        },
        pages_per_sheet: 8,
        spacing_cm: 1.0,
        ..Default::default()
    };
    // Passes field validation but leaves no room for a 2x4 grid
    assert!(options.validate().is_ok());
    assert!(matches!(
        options.layout_plan(),
        Err(NupError::InvalidLayout(_))
    ));
}

#[test]
fn test_sheet_spec_follows_orientation() {
    let mut options = NupOptions {
        paper: PaperSize::Letter,
        ..Default::default()
    };
    let portrait = options.sheet_spec();
    assert!(portrait.height_pt > portrait.width_pt);

    options.orientation = Orientation::Landscape;
    let landscape = options.sheet_spec();
    assert_eq!(landscape.width_pt, portrait.height_pt);
    assert_eq!(landscape.height_pt, portrait.width_pt);

    // Custom sizes are normalized the same way
    options.paper = PaperSize::Custom {
        width_cm: 30.0,
        height_cm: 10.0,
    };
    options.orientation = Orientation::Portrait;
    let custom = options.sheet_spec();
    assert!(custom.height_pt > custom.width_pt);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = NupOptions {
        paper: PaperSize::Custom {
            width_cm: 12.5,
            height_cm: 20.0,
        },
        orientation: Orientation::Landscape,
        pages_per_sheet: 8,
        spacing_cm: 0.3,
        output_dpi: 200,
        preview_dpi: 60,
        output_dir: Some(PathBuf::from("out")),
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    options.save(path).await.unwrap();

    // Load
    let loaded = NupOptions::load(path).await.unwrap();
    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"{ "pages_per_sheet": 4, "orientation": "Horizontal" }"#,
    )
    .unwrap();

    let loaded = NupOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.pages_per_sheet, 4);
    assert_eq!(loaded.orientation, Orientation::Landscape);
    assert_eq!(loaded.paper, PaperSize::A4);
    assert_eq!(loaded.spacing_cm, 0.17);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_malformed_config_is_a_config_error() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "{ not json").unwrap();

    let result = NupOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(NupError::Config(_))));
}
