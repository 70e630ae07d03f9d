use super::*;
use crate::{
    common::*,
    processor::{load_rgb_image, ImageTransform, TransformConfig},
    report::Reporter,
};

/// The labeled image dataset described by a JSON Lines manifest.
#[derive(Debug, Clone)]
pub struct ManifestDataset {
    image_dir: PathBuf,
    records: Vec<Record>,
    transform: ImageTransform,
    skip: WrapAroundSkip,
}

impl ManifestDataset {
    /// Load the manifest and build the dataset with the default transformation.
    pub fn load(image_dir: impl AsRef<Path>, manifest_file: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_transform(image_dir, manifest_file, TransformConfig::default())
    }

    pub fn load_with_transform(
        image_dir: impl AsRef<Path>,
        manifest_file: impl AsRef<Path>,
        transform: TransformConfig,
    ) -> Result<Self> {
        let image_dir = image_dir.as_ref();
        let manifest_file = manifest_file.as_ref();

        let transform = ImageTransform::new(transform)?;
        let records = load_manifest(manifest_file)?;
        info!(
            "loaded {} records from manifest '{}'",
            records.len(),
            manifest_file.display()
        );

        Ok(Self {
            image_dir: image_dir.to_owned(),
            records,
            transform,
            skip: WrapAroundSkip::default(),
        })
    }

    pub fn with_max_skips(self, max_skips: impl Into<Option<usize>>) -> Self {
        Self {
            skip: self.skip.with_max_skips(max_skips),
            ..self
        }
    }

    pub fn with_reporter(self, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            skip: self.skip.with_reporter(reporter),
            ..self
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl GenericDataset for ManifestDataset {
    fn num_records(&self) -> usize {
        self.records.len()
    }

    fn transform(&self) -> &ImageTransform {
        &self.transform
    }
}

impl FileDataset for ManifestDataset {
    fn image_path(&self, index: usize) -> Option<PathBuf> {
        let record = self.records.get(index)?;
        Some(self.image_dir.join(&record.image_path))
    }
}

impl RandomAccessDataset for ManifestDataset {
    type Sample = LabeledSample;

    fn nth(&self, index: usize) -> Result<Self::Sample> {
        let (index, path) = self.skip.find(self, index)?;
        let record = &self.records[index];

        let image = load_rgb_image(&path)?;
        let image = self
            .transform
            .forward(&image)
            .with_context(|| format!("failed to transform image file '{}'", path.display()))?;

        Ok(LabeledSample::new(record, image))
    }
}

/// Parse a JSON Lines manifest file into records.
///
/// Each non-blank line must be a JSON object with at least the keys
/// `image_path`, `image_hash`, `leaf_class_idx` and `leaf_wd_id`.
pub fn load_manifest(manifest_file: impl AsRef<Path>) -> Result<Vec<Record>> {
    let manifest_file = manifest_file.as_ref();
    let file = File::open(manifest_file)
        .with_context(|| format!("failed to open manifest '{}'", manifest_file.display()))?;

    let records: Vec<Record> = BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(|(line_index, line)| {
            let line_no = line_index + 1;
            let result = line
                .map_err(Error::from)
                .and_then(|line| {
                    if line.trim().is_empty() {
                        return Ok(None);
                    }
                    let record: Record = serde_json::from_str(&line)?;
                    Ok(Some(record))
                })
                .with_context(|| {
                    format!(
                        "failed to parse line {} of manifest '{}'",
                        line_no,
                        manifest_file.display()
                    )
                });
            result.transpose()
        })
        .try_collect()?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_keeps_known_keys() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let manifest_file = dir.path().join("manifest.jsonl");
        fs::write(
            &manifest_file,
            concat!(
                r#"{"image_path": "a/cat.jpg", "image_hash": "abc", "leaf_class_idx": 3, "leaf_wd_id": "Q1", "split": "test"}"#,
                "\n\n",
                r#"{"leaf_wd_id": "Q2", "image_hash": "def", "image_path": "dog.png", "leaf_class_idx": 0, "extra": {"nested": [1, 2]}}"#,
                "\n",
            ),
        )?;

        let records = load_manifest(&manifest_file)?;
        assert_eq!(
            records,
            vec![
                Record {
                    image_path: "a/cat.jpg".into(),
                    image_hash: "abc".into(),
                    leaf_class_idx: 3,
                    leaf_wd_id: "Q1".into(),
                },
                Record {
                    image_path: "dog.png".into(),
                    image_hash: "def".into(),
                    leaf_class_idx: 0,
                    leaf_wd_id: "Q2".into(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn manifest_missing_key_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let manifest_file = dir.path().join("manifest.jsonl");
        fs::write(
            &manifest_file,
            concat!(
                r#"{"image_path": "cat.jpg", "image_hash": "abc", "leaf_class_idx": 3, "leaf_wd_id": "Q1"}"#,
                "\n",
                r#"{"image_path": "dog.jpg", "image_hash": "def", "leaf_wd_id": "Q2"}"#,
                "\n",
            ),
        )?;

        let err = load_manifest(&manifest_file).unwrap_err();
        assert!(format!("{}", err).contains("line 2"));
        assert!(ManifestDataset::load(dir.path(), &manifest_file).is_err());
        Ok(())
    }

    #[test]
    fn manifest_malformed_json_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let manifest_file = dir.path().join("manifest.jsonl");
        fs::write(&manifest_file, "{\"image_path\": \n")?;

        assert!(load_manifest(&manifest_file).is_err());
        Ok(())
    }

    #[test]
    fn image_path_is_resolved_against_image_dir() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let manifest_file = dir.path().join("manifest.jsonl");
        fs::write(
            &manifest_file,
            r#"{"image_path": "sub/cat.jpg", "image_hash": "abc", "leaf_class_idx": 3, "leaf_wd_id": "Q1"}"#,
        )?;

        let dataset = ManifestDataset::load(dir.path().join("images"), &manifest_file)?;
        assert_eq!(dataset.num_records(), 1);
        assert_eq!(
            dataset.image_path(0),
            Some(dir.path().join("images").join("sub/cat.jpg"))
        );
        assert_eq!(dataset.image_path(1), None);
        Ok(())
    }
}
