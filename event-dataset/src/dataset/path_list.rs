use super::*;
use crate::{
    common::*,
    processor::{load_image, normalize_channels, ImageTransform, TransformConfig},
    report::Reporter,
};

/// The inference dataset over an explicit list of image files.
///
/// Unlike [ManifestDataset], images may have arbitrary channel layouts.
/// Grayscale, grayscale-alpha and RGBA images are normalized to 3
/// channels before the transformation.
#[derive(Debug, Clone)]
pub struct PathListDataset {
    image_paths: Vec<PathBuf>,
    transform: ImageTransform,
    skip: WrapAroundSkip,
}

impl PathListDataset {
    pub fn new<P>(image_paths: impl IntoIterator<Item = P>) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        Self::with_transform(image_paths, TransformConfig::default())
    }

    pub fn with_transform<P>(
        image_paths: impl IntoIterator<Item = P>,
        transform: TransformConfig,
    ) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        let image_paths: Vec<PathBuf> = image_paths.into_iter().map(Into::into).collect();
        let transform = ImageTransform::new(transform)?;

        Ok(Self {
            image_paths,
            transform,
            skip: WrapAroundSkip::default(),
        })
    }

    /// Build the dataset from files matching a glob pattern, sorted by path.
    pub fn from_glob(pattern: &str) -> Result<Self> {
        let mut image_paths: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern '{}'", pattern))?
            .try_collect()?;
        image_paths.sort();
        if image_paths.is_empty() {
            warn!("no files match the pattern '{}'", pattern);
        }
        Self::new(image_paths)
    }

    /// Build the dataset from a text file listing one image path per line.
    pub fn from_list_file(list_file: impl AsRef<Path>) -> Result<Self> {
        let image_paths = load_path_list_file(list_file)?;
        Self::new(image_paths)
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

    pub fn with_transform_config(self, transform: TransformConfig) -> Result<Self> {
        Ok(Self {
            transform: ImageTransform::new(transform)?,
            ..self
        })
    }

    pub fn image_paths(&self) -> &[PathBuf] {
        &self.image_paths
    }
}

impl GenericDataset for PathListDataset {
    fn num_records(&self) -> usize {
        self.image_paths.len()
    }

    fn transform(&self) -> &ImageTransform {
        &self.transform
    }
}

impl FileDataset for PathListDataset {
    fn image_path(&self, index: usize) -> Option<PathBuf> {
        self.image_paths.get(index).cloned()
    }
}

impl RandomAccessDataset for PathListDataset {
    type Sample = PathSample;

    fn nth(&self, index: usize) -> Result<Self::Sample> {
        let (index, path) = self.skip.find(self, index)?;

        let image = load_image(&path)?;
        let image = normalize_channels(&image)
            .with_context(|| format!("unsupported image layout in '{}'", path.display()))?;
        let image = self
            .transform
            .forward(&image)
            .with_context(|| format!("failed to transform image file '{}'", path.display()))?;

        Ok(PathSample {
            image_path: self.image_paths[index].clone(),
            image,
        })
    }
}
