use sitemap_core::{
    export_notes, DemoImportSource, ExportError, ExportFormat, Note, SiteMapConfig, SiteMapStore,
};
use std::sync::Arc;

#[test]
fn json_export_serializes_notes_verbatim() {
    let store = SiteMapStore::with_sample_data(
        SiteMapConfig::default(),
        Arc::new(DemoImportSource::instant()),
    );

    let artifact = export_notes(store.notes(), ExportFormat::Json).expect("json export");
    assert_eq!(artifact.file_name, "sitemap.json");
    assert_eq!(artifact.mime_type, "application/json");

    let value: serde_json::Value = serde_json::from_slice(&artifact.bytes).expect("valid json");
    let pages = value.as_array().expect("notes array");
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0]["title"], "Home Page");
    assert_eq!(pages[0]["zIndex"], 1);
    assert!(pages[0].get("parentId").is_none());
    assert_eq!(pages[1]["parentId"], "1");

    let decoded: Vec<Note> = serde_json::from_slice(&artifact.bytes).expect("round trip");
    assert_eq!(decoded.as_slice(), store.notes());
}

#[test]
fn image_formats_are_placeholders() {
    for format in [ExportFormat::Png, ExportFormat::Pdf] {
        let err = export_notes(&[], format).expect_err("not implemented");
        assert!(matches!(err, ExportError::Unsupported(f) if f == format));
        assert!(err.to_string().contains("not implemented"));
    }
}

#[test]
fn empty_map_exports_empty_array() {
    let artifact = export_notes(&[], ExportFormat::Json).expect("json export");
    assert_eq!(artifact.bytes, b"[]");
}
