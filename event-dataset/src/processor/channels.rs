//! Channel layout normalization for heterogeneous real-world images.

use crate::common::*;

/// Normalize an image tensor to a `[height, width, 3]` layout.
///
/// * `[height, width]` grayscale is replicated into 3 channels.
/// * More than 3 channels keeps the first 3, dropping alpha.
/// * Fewer than 3 channels replicates the first channel.
pub fn normalize_channels(image: &Tensor) -> Result<Tensor> {
    let normalized = match *image.size().as_slice() {
        [_height, _width] => image.unsqueeze(-1).repeat(&[1, 1, 3]),
        [_height, _width, channels] if channels > 3 => image.narrow(2, 0, 3),
        [_height, _width, channels] if channels < 3 => image.narrow(2, 0, 1).repeat(&[1, 1, 3]),
        [_height, _width, _channels] => image.shallow_clone(),
        ref shape => bail!(
            "expect a 2 or 3 dimensional image tensor, but get shape {:?}",
            shape
        ),
    };

    Ok(normalized.contiguous())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Tensor {
        Tensor::of_slice(&[10u8, 20, 30, 40, 50, 60]).view([2, 3])
    }

    #[test]
    fn grayscale_is_replicated() -> Result<()> {
        let gray = gray();
        let output = normalize_channels(&gray)?;
        let expect = Tensor::stack(&[gray.shallow_clone(), gray.shallow_clone(), gray], 2);

        assert_eq!(output.size(), vec![2, 3, 3]);
        assert!(output.equal(&expect));
        Ok(())
    }

    #[test]
    fn alpha_is_dropped() -> Result<()> {
        let rgba = Tensor::of_slice(&[1u8, 2, 3, 255, 4, 5, 6, 128]).view([1, 2, 4]);
        let output = normalize_channels(&rgba)?;
        let expect = Tensor::of_slice(&[1u8, 2, 3, 4, 5, 6]).view([1, 2, 3]);

        assert!(output.equal(&expect));
        Ok(())
    }

    #[test]
    fn luma_alpha_replicates_first_channel() -> Result<()> {
        let luma_alpha = Tensor::of_slice(&[7u8, 255, 8, 0]).view([1, 2, 2]);
        let output = normalize_channels(&luma_alpha)?;
        let expect = Tensor::of_slice(&[7u8, 7, 7, 8, 8, 8]).view([1, 2, 3]);

        assert!(output.equal(&expect));
        Ok(())
    }

    #[test]
    fn rgb_is_unchanged() -> Result<()> {
        let rgb = Tensor::of_slice(&[1u8, 2, 3, 4, 5, 6]).view([2, 1, 3]);
        let output = normalize_channels(&rgb)?;

        assert!(output.equal(&rgb));
        Ok(())
    }

    #[test]
    fn reject_other_ranks() {
        let batch = Tensor::zeros(&[1, 2, 2, 3], (Kind::Uint8, tch::Device::Cpu));
        assert!(normalize_channels(&batch).is_err());
    }
}
