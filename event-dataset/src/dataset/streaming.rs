use super::*;
use crate::{common::*, processor::ImageTransform};

/// Enumerates a random access dataset as a stream.
///
/// Samples are loaded concurrently on blocking worker threads and
/// delivered in index order.
#[derive(Debug)]
pub struct RandomAccessStream<D>
where
    D: ?Sized,
{
    dataset: Arc<D>,
    num_workers: Option<NonZeroUsize>,
}

impl<D> RandomAccessStream<D>
where
    D: 'static + RandomAccessDataset + Sync,
{
    pub fn new(dataset: D) -> Self {
        Self::from_arc(Arc::new(dataset))
    }
}

impl<D> RandomAccessStream<D>
where
    D: 'static + RandomAccessDataset + Sync + ?Sized,
{
    pub fn from_arc(dataset: Arc<D>) -> Self {
        Self {
            dataset,
            num_workers: None,
        }
    }

    /// Set the number of concurrent workers. It defaults to the number of CPUs.
    pub fn with_num_workers(self, num_workers: impl Into<Option<NonZeroUsize>>) -> Self {
        Self {
            num_workers: num_workers.into(),
            ..self
        }
    }
}

impl<D> GenericDataset for RandomAccessStream<D>
where
    D: 'static + RandomAccessDataset + Sync + ?Sized,
{
    fn num_records(&self) -> usize {
        self.dataset.num_records()
    }

    fn transform(&self) -> &ImageTransform {
        self.dataset.transform()
    }
}

impl<D> StreamingDataset for RandomAccessStream<D>
where
    D: 'static + RandomAccessDataset + Sync + ?Sized,
    D::Sample: 'static + Send,
{
    type Sample = D::Sample;

    fn stream(&self) -> Result<Pin<Box<dyn Stream<Item = Result<(usize, Self::Sample)>> + Send>>> {
        let num_records = self.dataset.num_records();
        let num_workers = self
            .num_workers
            .map(NonZeroUsize::get)
            .unwrap_or_else(num_cpus::get);
        let dataset = self.dataset.clone();

        let stream = stream::iter(0..num_records).par_map(num_workers, move |index| {
            let dataset = dataset.clone();
            move || -> Result<_> {
                let sample = dataset.nth(index)?;
                Ok((index, sample))
            }
        });

        Ok(Box::pin(stream))
    }
}
