use crate::common::*;

/// The per-sample metadata written next to the exported images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SampleMetadata {
    Labeled {
        index: usize,
        image_path: PathBuf,
        image_hash: String,
        leaf_class_idx: i64,
        leaf_wd_id: String,
    },
    Frame {
        index: usize,
    },
    Path {
        index: usize,
        image_path: PathBuf,
    },
}

impl SampleMetadata {
    pub fn new(index: usize, sample: &Sample) -> Self {
        match sample {
            Sample::Labeled(sample) => Self::Labeled {
                index,
                image_path: sample.image_path.clone(),
                image_hash: sample.image_hash.clone(),
                leaf_class_idx: sample.leaf_class_idx,
                leaf_wd_id: sample.leaf_wd_id.clone(),
            },
            Sample::Frame(_) => Self::Frame { index },
            Sample::Path(sample) => Self::Path {
                index,
                image_path: sample.image_path.clone(),
            },
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Self::Labeled { index, .. } => index,
            Self::Frame { index } => index,
            Self::Path { index, .. } => index,
        }
    }
}

impl std::fmt::Display for SampleMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Labeled {
                index,
                image_path,
                leaf_class_idx,
                leaf_wd_id,
                ..
            } => write!(
                f,
                "#{} '{}' class={} wd_id={}",
                index,
                image_path.display(),
                leaf_class_idx,
                leaf_wd_id
            ),
            Self::Frame { index } => write!(f, "#{} frame", index),
            Self::Path { index, image_path } => write!(f, "#{} '{}'", index, image_path.display()),
        }
    }
}

/// Count the labeled samples per class.
pub fn class_counts(metadata: &[SampleMetadata]) -> BTreeMap<i64, usize> {
    metadata
        .iter()
        .filter_map(|meta| match *meta {
            SampleMetadata::Labeled { leaf_class_idx, .. } => Some(leaf_class_idx),
            _ => None,
        })
        .counts()
        .into_iter()
        .collect()
}

/// Count the samples whose image path also appears in an earlier sample.
pub fn num_duplicated_paths(metadata: &[SampleMetadata]) -> usize {
    let paths: Vec<_> = metadata
        .iter()
        .filter_map(|meta| match meta {
            SampleMetadata::Labeled { image_path, .. } => Some(image_path),
            SampleMetadata::Path { image_path, .. } => Some(image_path),
            SampleMetadata::Frame { .. } => None,
        })
        .collect();
    paths.len() - paths.iter().unique().count()
}

/// Log sample statistics and the number of image files that were found
/// missing and skipped over.
pub fn report_summary(metadata: &[SampleMetadata], num_missing_files: usize) {
    info!("processed {} samples", metadata.len());

    let class_counts = class_counts(metadata);
    if !class_counts.is_empty() {
        info!("{} classes found", class_counts.len());
        class_counts.iter().for_each(|(class, count)| {
            info!("class {}: {} samples", class, count);
        });
    }

    let num_duplicated = num_duplicated_paths(metadata);
    if num_duplicated > 0 {
        info!("{} samples share an image path with an earlier sample", num_duplicated);
    }

    if num_missing_files > 0 {
        warn!(
            "missing image files were reported {} times and substituted by following records",
            num_missing_files
        );
    }
}
