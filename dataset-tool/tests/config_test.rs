use anyhow::Result;
use dataset_tool::config::{Config, DatasetKind};
use event_dataset::processor::TransformConfig;

#[test]
fn config_files_test() -> Result<()> {
    for file in glob::glob(&format!("{}/cfg/*.json5", env!("CARGO_MANIFEST_DIR")))? {
        let _ = Config::open(file?)?;
    }

    Ok(())
}

#[test]
fn omitted_transform_is_imagenet() -> Result<()> {
    let config = Config::open(format!("{}/cfg/infer.json5", env!("CARGO_MANIFEST_DIR")))?;

    assert_eq!(config.transform, TransformConfig::default());
    assert_eq!(config.dataset.max_skips, Some(16));
    assert!(matches!(config.dataset.kind, DatasetKind::Glob { .. }));
    Ok(())
}

#[test]
fn reject_incompatible_version() {
    let text = r#"{
        version: "2.0.0",
        dataset: { kind: { type: "PathList", paths: [] } },
        output: { device: "cpu" },
    }"#;
    assert!(json5::from_str::<Config>(text).is_err());
}
