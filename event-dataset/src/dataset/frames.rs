use super::*;
use crate::{
    common::*,
    processor::{normalize_channels, ImageTransform, TransformConfig},
};

/// The dataset over video frames resident in memory.
#[derive(Debug)]
pub struct FrameDataset {
    frames: FrameStore,
    transform: ImageTransform,
}

/// Frames in `[frames, height, width]` or `[frames, height, width, channels]`
/// shape and `uint8` kind.
#[derive(Debug)]
struct FrameStore(Tensor);

// the frames are only read after construction
unsafe impl Sync for FrameStore {}

impl FrameDataset {
    /// Build the dataset from a `[frames, height, width]` grayscale or a
    /// `[frames, height, width, channels]` `uint8` tensor.
    ///
    /// Frames are normalized to 3 channels the same way as
    /// [PathListDataset] images.
    pub fn new(frames: Tensor) -> Result<Self> {
        Self::with_transform(frames, TransformConfig::default())
    }

    pub fn with_transform(frames: Tensor, transform: TransformConfig) -> Result<Self> {
        ensure!(
            frames.kind() == Kind::Uint8,
            "expect uint8 frames, but get {:?}",
            frames.kind()
        );
        match *frames.size().as_slice() {
            [_n_frames, height, width] => {
                ensure!(height > 0 && width > 0, "the frames are empty");
            }
            [_n_frames, height, width, channels] => {
                ensure!(height > 0 && width > 0, "the frames are empty");
                ensure!(channels > 0, "the frames have no channels");
            }
            ref shape => bail!(
                "expect frames in [frames, height, width] or [frames, height, width, channels] shape, but get {:?}",
                shape
            ),
        }

        let transform = ImageTransform::new(transform)?;

        Ok(Self {
            frames: FrameStore(frames),
            transform,
        })
    }

    /// Stack frames of equal shape into a dataset.
    pub fn from_frames<T>(frames: impl IntoIterator<Item = T>) -> Result<Self>
    where
        T: Borrow<Tensor>,
    {
        let frames: Vec<_> = frames.into_iter().collect();
        ensure!(!frames.is_empty(), "no frames are given");

        let shape = frames[0].borrow().size();
        ensure!(
            frames.iter().all(|frame| frame.borrow().size() == shape),
            "frames must have equal shapes"
        );

        Self::new(Tensor::stack(&frames, 0))
    }

    pub fn frames(&self) -> &Tensor {
        &self.frames.0
    }
}

impl GenericDataset for FrameDataset {
    fn num_records(&self) -> usize {
        self.frames.0.size()[0] as usize
    }

    fn transform(&self) -> &ImageTransform {
        &self.transform
    }
}

impl RandomAccessDataset for FrameDataset {
    type Sample = FrameSample;

    fn nth(&self, index: usize) -> Result<Self::Sample> {
        ensure!(index < self.num_records(), "invalid index {}", index);
        let frame = self.frames.0.select(0, index as i64);
        let frame = normalize_channels(&frame)?;
        let image = self.transform.forward(&frame)?;
        Ok(FrameSample { image })
    }
}
