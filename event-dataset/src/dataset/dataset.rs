use crate::{common::*, processor::ImageTransform};

/// The generic dataset trait.
pub trait GenericDataset
where
    Self: Debug + Send,
{
    /// Get number of records in the dataset.
    ///
    /// The value equals the size of the backing collection and never
    /// changes during the lifetime of the dataset.
    fn num_records(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.num_records() == 0
    }

    /// The transformation applied on every image of the dataset.
    fn transform(&self) -> &ImageTransform;
}

/// The dataset backed with image files.
pub trait FileDataset
where
    Self: GenericDataset,
{
    /// Get the resolved path of the image file of the nth record.
    fn image_path(&self, index: usize) -> Option<PathBuf>;
}

/// The dataset that can be random accessed.
pub trait RandomAccessDataset
where
    Self: GenericDataset,
{
    type Sample;

    /// Get the nth sample in the dataset.
    fn nth(&self, index: usize) -> Result<Self::Sample>;
}

/// The dataset that can be enumerated through a stream.
pub trait StreamingDataset
where
    Self: GenericDataset,
{
    type Sample;

    /// Enumerate `(index, sample)` pairs in index order.
    fn stream(&self) -> Result<Pin<Box<dyn Stream<Item = Result<(usize, Self::Sample)>> + Send>>>;
}
