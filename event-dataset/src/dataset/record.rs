use crate::common::*;

/// The manifest record with image path and labels, but without image pixels.
///
/// Keys other than the four listed fields are dropped when the manifest
/// is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Image file path relative to the image directory.
    pub image_path: PathBuf,
    pub image_hash: String,
    /// The class label of the leaf event class.
    pub leaf_class_idx: i64,
    /// The external identifier of the leaf event class.
    pub leaf_wd_id: String,
}

/// The labeled sample produced by [ManifestDataset](super::ManifestDataset).
#[derive(Debug, TensorLike)]
pub struct LabeledSample {
    #[tensor_like(clone)]
    pub image_path: PathBuf,
    #[tensor_like(clone)]
    pub image_hash: String,
    #[tensor_like(copy)]
    pub leaf_class_idx: i64,
    #[tensor_like(clone)]
    pub leaf_wd_id: String,
    pub image: Tensor,
}

impl LabeledSample {
    pub fn new(record: &Record, image: Tensor) -> Self {
        let Record {
            image_path,
            image_hash,
            leaf_class_idx,
            leaf_wd_id,
        } = record.clone();

        Self {
            image_path,
            image_hash,
            leaf_class_idx,
            leaf_wd_id,
            image,
        }
    }

    /// Get the record fields of the sample.
    pub fn record(&self) -> Record {
        Record {
            image_path: self.image_path.clone(),
            image_hash: self.image_hash.clone(),
            leaf_class_idx: self.leaf_class_idx,
            leaf_wd_id: self.leaf_wd_id.clone(),
        }
    }
}

/// The sample produced by [FrameDataset](super::FrameDataset).
#[derive(Debug, TensorLike)]
pub struct FrameSample {
    pub image: Tensor,
}

/// The sample produced by [PathListDataset](super::PathListDataset).
#[derive(Debug, TensorLike)]
pub struct PathSample {
    /// The path as given to the dataset.
    #[tensor_like(clone)]
    pub image_path: PathBuf,
    pub image: Tensor,
}

/// A sample of any dataset kind.
#[derive(Debug)]
pub enum Sample {
    Labeled(LabeledSample),
    Frame(FrameSample),
    Path(PathSample),
}

impl Sample {
    pub fn image(&self) -> &Tensor {
        match self {
            Self::Labeled(sample) => &sample.image,
            Self::Frame(sample) => &sample.image,
            Self::Path(sample) => &sample.image,
        }
    }

    pub fn into_image(self) -> Tensor {
        match self {
            Self::Labeled(sample) => sample.image,
            Self::Frame(sample) => sample.image,
            Self::Path(sample) => sample.image,
        }
    }

    /// Get the image path of the sample, if it is backed with a file.
    pub fn image_path(&self) -> Option<&Path> {
        match self {
            Self::Labeled(sample) => Some(&sample.image_path),
            Self::Frame(_) => None,
            Self::Path(sample) => Some(&sample.image_path),
        }
    }
}

impl From<LabeledSample> for Sample {
    fn from(from: LabeledSample) -> Self {
        Self::Labeled(from)
    }
}

impl From<FrameSample> for Sample {
    fn from(from: FrameSample) -> Self {
        Self::Frame(from)
    }
}

impl From<PathSample> for Sample {
    fn from(from: PathSample) -> Self {
        Self::Path(from)
    }
}
