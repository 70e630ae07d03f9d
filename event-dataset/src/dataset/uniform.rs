use super::*;
use crate::{common::*, processor::ImageTransform};

/// A random access dataset producing [Sample] regardless of its source kind.
pub type DynDataset = dyn RandomAccessDataset<Sample = Sample> + Sync;

/// Wraps a dataset so that its samples are converted into [Sample].
///
/// It allows datasets of different kinds to live behind a single
/// [DynDataset] trait object.
#[derive(Debug)]
pub struct UniformDataset<D>
where
    D: RandomAccessDataset,
{
    dataset: D,
}

impl<D> UniformDataset<D>
where
    D: RandomAccessDataset,
    D::Sample: Into<Sample>,
{
    pub fn new(dataset: D) -> Self {
        Self { dataset }
    }
}

impl<D> GenericDataset for UniformDataset<D>
where
    D: RandomAccessDataset,
{
    fn num_records(&self) -> usize {
        self.dataset.num_records()
    }

    fn transform(&self) -> &ImageTransform {
        self.dataset.transform()
    }
}

impl<D> RandomAccessDataset for UniformDataset<D>
where
    D: RandomAccessDataset,
    D::Sample: Into<Sample>,
{
    type Sample = Sample;

    fn nth(&self, index: usize) -> Result<Self::Sample> {
        let sample = self.dataset.nth(index)?;
        Ok(sample.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tch::Device;

    #[test]
    fn uniform_dataset_test() -> Result<()> {
        let frames = Tensor::randint(256, &[2, 32, 32, 3], (Kind::Uint8, Device::Cpu));
        let dataset: Box<DynDataset> = Box::new(UniformDataset::new(FrameDataset::new(frames)?));

        assert_eq!(dataset.num_records(), 2);
        let sample = dataset.nth(1)?;
        assert!(matches!(sample, Sample::Frame(_)));
        assert_eq!(sample.image().size(), vec![3, 224, 224]);
        assert_eq!(sample.image_path(), None);
        Ok(())
    }
}
