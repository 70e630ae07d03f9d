//! The fixed resize, center crop and normalization pipeline.

use crate::common::*;

/// The ImageNet per-channel mean.
pub const IMAGENET_MEAN: [f64; 3] = [0.485, 0.456, 0.406];
/// The ImageNet per-channel standard deviation.
pub const IMAGENET_STD: [f64; 3] = [0.229, 0.224, 0.225];

/// Options of the image transformation.
///
/// Omitted fields take the values of the ImageNet pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// The length of the shorter image side after resizing.
    pub resize: NonZeroUsize,
    /// The side length of the square center crop.
    pub crop_size: NonZeroUsize,
    /// Per-channel mean subtracted from `[0, 1]` scaled values.
    pub mean: [f64; 3],
    /// Per-channel standard deviation dividing the centered values.
    pub std: [f64; 3],
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            resize: NonZeroUsize::new(224).unwrap(),
            crop_size: NonZeroUsize::new(224).unwrap(),
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
        }
    }
}

/// Converts a `[height, width, 3]` `uint8` image into a normalized
/// `[3, crop_size, crop_size]` float tensor.
///
/// The transformation is deterministic and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct ImageTransform {
    config: TransformConfig,
}

impl ImageTransform {
    pub fn new(config: TransformConfig) -> Result<Self> {
        let TransformConfig {
            resize,
            crop_size,
            std,
            ..
        } = &config;

        ensure!(
            crop_size <= resize,
            "crop_size ({}) must not exceed resize ({})",
            crop_size,
            resize
        );
        ensure!(
            std.iter().all(|&value| value > 0.0),
            "std must be positive, but get {:?}",
            std
        );

        Ok(Self { config })
    }

    /// The shape of transformed images.
    pub fn output_shape(&self) -> [i64; 3] {
        let crop_size = self.config.crop_size.get() as i64;
        [3, crop_size, crop_size]
    }

    pub fn forward(&self, image: &Tensor) -> Result<Tensor> {
        let TransformConfig {
            resize,
            crop_size,
            mean,
            std,
        } = &self.config;
        let resize = resize.get() as i64;
        let crop_size = crop_size.get() as i64;

        ensure!(
            image.kind() == Kind::Uint8,
            "expect a uint8 image, but get {:?}",
            image.kind()
        );
        let (height, width, channels) = image.size3()?;
        ensure!(
            channels == 3,
            "expect a [height, width, 3] image, but get {:?}",
            image.size()
        );
        ensure!(height > 0 && width > 0, "the image is empty");

        tch::no_grad(|| -> Result<_> {
            let image = image.permute(&[2, 0, 1]).contiguous();

            // resize the shorter side
            let (resized_h, resized_w) = resized_size(height, width, resize);
            let resized = if (resized_h, resized_w) == (height, width) {
                image
            } else {
                vision::image::resize(&image, resized_w, resized_h)?
            };

            // center crop
            let top = round_half_even_div2(resized_h - crop_size);
            let left = round_half_even_div2(resized_w - crop_size);
            let cropped = resized.i((.., top..(top + crop_size), left..(left + crop_size)));

            // scale and normalize
            let mean = Tensor::of_slice(mean).to_kind(Kind::Float).view([3, 1, 1]);
            let std = Tensor::of_slice(std).to_kind(Kind::Float).view([3, 1, 1]);
            let scaled = cropped.to_kind(Kind::Float) / 255.0;
            let normalized = ((scaled - mean) / std).contiguous();

            Ok(normalized)
        })
    }
}

/// Compute the output size that scales the shorter side to `size`, keeping
/// the aspect ratio. The longer side is truncated.
fn resized_size(height: i64, width: i64, size: i64) -> (i64, i64) {
    if height <= width {
        if height == size {
            return (height, width);
        }
        (size, (size as f64 * width as f64 / height as f64) as i64)
    } else {
        if width == size {
            return (height, width);
        }
        ((size as f64 * height as f64 / width as f64) as i64, size)
    }
}

/// Compute `round(diff / 2)` with ties to even.
fn round_half_even_div2(diff: i64) -> i64 {
    let half = diff / 2;
    if diff % 2 != 0 && half % 2 != 0 {
        half + 1
    } else {
        half
    }
}
