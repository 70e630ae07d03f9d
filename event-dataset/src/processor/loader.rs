//! Image file decoding into `uint8` tensors.

use crate::common::*;
use image::{DynamicImage, GenericImageView as _};

/// Conversion from decoded images to tensors in height-width-channel order.
pub trait TryIntoTensor {
    type Error;

    fn try_into_tensor(self) -> Result<Tensor, Self::Error>;
}

impl TryIntoTensor for &DynamicImage {
    type Error = Error;

    /// Keeps the native channel layout of the image. Grayscale images
    /// become 2-dimensional `[height, width]` tensors, while the others
    /// become `[height, width, channels]` tensors. Components wider than
    /// 8 bits are scaled down to 8 bits.
    fn try_into_tensor(self) -> Result<Tensor, Self::Error> {
        let (width, height) = self.dimensions();
        let height = height as i64;
        let width = width as i64;

        let tensor = match self.color().channel_count() {
            1 => {
                let raw = self.to_luma8().into_raw();
                Tensor::of_slice(&raw).view([height, width])
            }
            2 => {
                let raw = self.to_luma_alpha8().into_raw();
                Tensor::of_slice(&raw).view([height, width, 2])
            }
            3 => {
                let raw = self.to_rgb8().into_raw();
                Tensor::of_slice(&raw).view([height, width, 3])
            }
            4 => {
                let raw = self.to_rgba8().into_raw();
                Tensor::of_slice(&raw).view([height, width, 4])
            }
            n_channels => bail!("images with {} channels are not supported", n_channels),
        };

        Ok(tensor)
    }
}

/// Decode an image file.
pub fn decode_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("failed to decode image file '{}'", path.display()))?;
    Ok(image)
}

/// Load an image file as a `uint8` tensor with its native channel layout.
///
/// The output is either `[height, width]` or `[height, width, channels]`.
pub fn load_image(path: impl AsRef<Path>) -> Result<Tensor> {
    let image = decode_image(path)?;
    image.try_into_tensor()
}

/// Load an image file as a `[height, width, 3]` RGB `uint8` tensor.
///
/// The color conversion is done by the decoder. Grayscale is replicated
/// and the alpha channel is dropped.
pub fn load_rgb_image(path: impl AsRef<Path>) -> Result<Tensor> {
    let image = decode_image(path)?;
    let image = DynamicImage::ImageRgb8(image.to_rgb8());
    image.try_into_tensor()
}
