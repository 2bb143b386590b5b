//! Upstream example supply: a cyclic source of flat pixel buffers with labels,
//! decoded and shuffled into batches for a downstream consumer.

pub mod cifar;
pub mod source;

pub use self::source::{one_hot, CyclicSource, LabeledExample};

use crate::error::{Result, ShuffleError};
use crate::image::ImageF32;
use crate::normalize::{pow2_dimensions, PadMode};
use crate::shuffle::ShufflePlan;
use log::debug;
use serde::{Deserialize, Serialize};

/// Layout of the flat pixel buffers a source serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExampleFormat {
    /// Row-major 8-bit grayscale (e.g. MNIST, 28×28).
    Gray { width: usize, height: usize },
    /// Planar RGB square (e.g. CIFAR-10, side 32), reduced to luma.
    PlanarRgb { side: usize },
}

impl ExampleFormat {
    /// Decode one buffer to a single-channel image with values in `[0, 1]`.
    pub fn decode(&self, pixels: &[u8]) -> Result<ImageF32> {
        match *self {
            ExampleFormat::Gray { width, height } => {
                if pixels.len() != width * height {
                    return Err(ShuffleError::InvalidDimension(format!(
                        "{} bytes for a {width}x{height} example",
                        pixels.len()
                    )));
                }
                let data = pixels.iter().map(|&p| p as f32 / 255.0).collect();
                ImageF32::from_raw(width, height, 1, data)
            }
            ExampleFormat::PlanarRgb { side } => cifar::grayscale_flat(pixels, side),
        }
    }
}

/// Permuted images with their one-hot labels.
#[derive(Clone, Debug)]
pub struct Batch {
    pub images: Vec<ImageF32>,
    pub labels: Vec<Vec<f32>>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Images flattened row-major and concatenated, one after another.
    pub fn flat_images(&self) -> Vec<f32> {
        self.images
            .iter()
            .flat_map(|img| img.data.iter().copied())
            .collect()
    }
}

/// Draw `batch_size` examples, normalize them to the plan's side and apply
/// the plan to all of them.
pub fn next_batch(
    source: &mut CyclicSource,
    format: ExampleFormat,
    batch_size: usize,
    num_classes: usize,
    pad: PadMode,
    plan: &ShufflePlan,
) -> Result<Batch> {
    let examples = source.next_batch(batch_size);
    let mut images = Vec::with_capacity(examples.len());
    let mut labels = Vec::with_capacity(examples.len());
    for ex in &examples {
        let decoded = format.decode(&ex.pixels)?;
        let normalized = pow2_dimensions(&decoded, pad)?;
        images.push(normalized.image);
        labels.push(one_hot(ex.label as usize, num_classes)?);
    }
    debug!(
        "next_batch: size={} position={} wraps={}",
        examples.len(),
        source.position(),
        source.wraps()
    );
    let images = plan.apply_batch(&images)?;
    Ok(Batch { images, labels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn gray_source() -> CyclicSource {
        let examples = (0..3u8)
            .map(|i| LabeledExample {
                pixels: vec![i * 10; 28 * 28],
                label: i,
            })
            .collect();
        CyclicSource::new(examples).unwrap()
    }

    #[test]
    fn mnist_like_batch_is_padded_and_labelled() {
        let mut src = gray_source();
        let plan = ShufflePlan::random(Geometry::new(5, 1).unwrap(), Some(1), Some(2)).unwrap();
        let fmt = ExampleFormat::Gray {
            width: 28,
            height: 28,
        };
        let batch = next_batch(&mut src, fmt, 4, 10, PadMode::Zero, &plan).unwrap();
        assert_eq!(batch.len(), 4);
        assert!(batch.images.iter().all(|img| img.w == 32 && img.h == 32));
        assert_eq!(batch.labels[3][0], 1.0);
        assert_eq!(batch.flat_images().len(), 4 * 32 * 32);
    }

    #[test]
    fn plan_geometry_must_match_normalized_side() {
        let mut src = gray_source();
        let plan = ShufflePlan::random(Geometry::new(4, 1).unwrap(), Some(1), None).unwrap();
        let fmt = ExampleFormat::Gray {
            width: 28,
            height: 28,
        };
        assert!(matches!(
            next_batch(&mut src, fmt, 2, 10, PadMode::Zero, &plan),
            Err(ShuffleError::InvalidDimension(_))
        ));
    }

    #[test]
    fn label_outside_class_count_fails() {
        let mut src = gray_source();
        let plan = ShufflePlan::new(Geometry::new(5, 0).unwrap(), None, None).unwrap();
        let fmt = ExampleFormat::Gray {
            width: 28,
            height: 28,
        };
        assert!(matches!(
            next_batch(&mut src, fmt, 3, 2, PadMode::Zero, &plan),
            Err(ShuffleError::InvalidLabel { .. })
        ));
    }

    #[test]
    fn gray_decode_checks_length() {
        let fmt = ExampleFormat::Gray {
            width: 2,
            height: 2,
        };
        assert!(fmt.decode(&[0, 1, 2]).is_err());
        assert!(fmt.decode(&[0, 1, 2, 3, 4]).is_err());
        let img = fmt.decode(&[0, 255, 0, 255]).unwrap();
        assert_eq!(img.data, vec![0.0, 1.0, 0.0, 1.0]);
    }
}
