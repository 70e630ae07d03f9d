use anyhow::Result;
use dataset_tool::{
    config::{Config, DatasetConfig, DatasetKind, OutputConfig, CONFIG_VERSION},
    input::build_dataset,
    metadata::{num_duplicated_paths, SampleMetadata},
};
use event_dataset::{
    dataset::{GenericDataset, RandomAccessDataset},
    processor::TransformConfig,
    report::{CountingReporter, MemoryReporter},
};
use image::{Rgb, RgbImage};
use semver::Version;
use std::{fs, path::Path, sync::Arc};
use tch::{Device, Tensor};

fn write_image(path: impl AsRef<Path>, width: u32, height: u32) -> Result<()> {
    RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8])).save(path)?;
    Ok(())
}

fn config(kind: DatasetKind, dir: &Path) -> Config {
    let version = Version::parse("0.1.0").unwrap();
    assert!(CONFIG_VERSION.matches(&version));

    Config {
        version,
        dataset: DatasetConfig {
            max_skips: None,
            kind,
        },
        transform: TransformConfig::default(),
        output: OutputConfig {
            device: Device::Cpu,
            num_workers: None,
            tensor_file: Some(dir.join("images.pt")),
            metadata_file: Some(dir.join("metadata.json")),
        },
    }
}

#[tokio::test]
async fn export_manifest_dataset() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_image(dir.path().join("cat.jpg"), 320, 240)?;
    write_image(dir.path().join("dog.png"), 200, 260)?;
    let manifest_file = dir.path().join("manifest.jsonl");
    fs::write(
        &manifest_file,
        concat!(
            r#"{"image_path": "cat.jpg", "image_hash": "abc", "leaf_class_idx": 3, "leaf_wd_id": "Q1"}"#,
            "\n",
            r#"{"image_path": "gone.jpg", "image_hash": "xyz", "leaf_class_idx": 5, "leaf_wd_id": "Q5"}"#,
            "\n",
            r#"{"image_path": "dog.png", "image_hash": "def", "leaf_class_idx": 4, "leaf_wd_id": "Q2"}"#,
            "\n",
        ),
    )?;

    let kind = DatasetKind::Manifest {
        image_dir: dir.path().to_owned(),
        manifest_file,
    };
    dataset_tool::start(Arc::new(config(kind, dir.path()))).await?;

    let images = Tensor::load(dir.path().join("images.pt"))?;
    assert_eq!(images.size(), vec![3, 3, 224, 224]);

    let metadata: Vec<SampleMetadata> =
        serde_json::from_str(&fs::read_to_string(dir.path().join("metadata.json"))?)?;
    let indexes: Vec<_> = metadata.iter().map(|meta| meta.index()).collect();
    assert_eq!(indexes, vec![0, 1, 2]);

    // the missing record is substituted by the next one
    match &metadata[1] {
        SampleMetadata::Labeled {
            leaf_class_idx,
            image_hash,
            ..
        } => {
            assert_eq!(*leaf_class_idx, 4);
            assert_eq!(image_hash, "def");
        }
        other => panic!("unexpected metadata {:?}", other),
    }
    assert!(images.get(1).equal(&images.get(2)));
    Ok(())
}

#[tokio::test]
async fn export_frames() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let tensor_file = dir.path().join("frames.pt");
    let frames = Tensor::randint(256, &[4, 90, 160, 3], (tch::Kind::Uint8, Device::Cpu));
    frames.save(&tensor_file)?;

    let kind = DatasetKind::Frames { tensor_file };
    dataset_tool::start(Arc::new(config(kind, dir.path()))).await?;

    let images = Tensor::load(dir.path().join("images.pt"))?;
    assert_eq!(images.size(), vec![4, 3, 224, 224]);
    Ok(())
}

#[test]
fn repeated_entries_are_not_missing_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_image(dir.path().join("cat.png"), 64, 48)?;
    let manifest_file = dir.path().join("manifest.jsonl");
    let line =
        r#"{"image_path": "cat.png", "image_hash": "abc", "leaf_class_idx": 3, "leaf_wd_id": "Q1"}"#;
    fs::write(&manifest_file, [line, line].join("\n"))?;

    let kind = DatasetKind::Manifest {
        image_dir: dir.path().to_owned(),
        manifest_file,
    };
    let reporter = Arc::new(CountingReporter::new(Arc::new(MemoryReporter::new())));
    let dataset = build_dataset(&config(kind, dir.path()), reporter.clone())?;

    let metadata: Vec<_> = (0..dataset.num_records())
        .map(|index| -> Result<_> {
            let sample = dataset.nth(index)?;
            Ok(SampleMetadata::new(index, &sample))
        })
        .collect::<Result<_>>()?;

    assert_eq!(num_duplicated_paths(&metadata), 1);
    assert_eq!(reporter.num_missing_files(), 0);
    Ok(())
}

#[test]
fn missing_entries_are_counted() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_image(dir.path().join("b.png"), 64, 48)?;

    let kind = DatasetKind::PathList {
        paths: vec![dir.path().join("a.png"), dir.path().join("b.png")],
    };
    let reporter = Arc::new(CountingReporter::new(Arc::new(MemoryReporter::new())));
    let dataset = build_dataset(&config(kind, dir.path()), reporter.clone())?;

    let first = dataset.nth(0)?;
    assert_eq!(first.image_path(), Some(dir.path().join("b.png").as_path()));
    dataset.nth(1)?;
    assert_eq!(reporter.num_missing_files(), 1);
    Ok(())
}
