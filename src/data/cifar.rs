//! CIFAR-10 binary batches: one label byte followed by a planar 32×32 RGB image.
use super::source::LabeledExample;
use crate::error::{Result, ShuffleError};
use crate::image::ImageF32;

pub const CIFAR_SIDE: usize = 32;
pub const CIFAR_CLASSES: usize = 10;
pub const CIFAR_IMAGE_BYTES: usize = 3 * CIFAR_SIDE * CIFAR_SIDE;
pub const CIFAR_RECORD_BYTES: usize = 1 + CIFAR_IMAGE_BYTES;

/// Luma weights in (B, G, R) order.
const BGR_WEIGHTS: [f32; 3] = [0.114, 0.587, 0.299];

pub fn parse_cifar_binary(bytes: &[u8]) -> Result<Vec<LabeledExample>> {
    let mut out = Vec::with_capacity(bytes.len() / CIFAR_RECORD_BYTES);
    for (index, record) in bytes.chunks(CIFAR_RECORD_BYTES).enumerate() {
        if record.len() != CIFAR_RECORD_BYTES {
            return Err(ShuffleError::Truncated {
                index,
                expected: CIFAR_RECORD_BYTES,
                got: record.len(),
            });
        }
        out.push(LabeledExample {
            label: record[0],
            pixels: record[1..].to_vec(),
        });
    }
    Ok(out)
}

/// Planar RGB to single-channel luma in `[0, 1)`.
pub fn grayscale_flat(planar: &[u8], side: usize) -> Result<ImageF32> {
    if side == 0 || planar.len() != 3 * side * side {
        return Err(ShuffleError::InvalidDimension(format!(
            "{} bytes is not a planar RGB image of side {side}",
            planar.len()
        )));
    }
    let plane = side * side;
    let (r, rest) = planar.split_at(plane);
    let (g, b) = rest.split_at(plane);
    let data = (0..plane)
        .map(|i| {
            (BGR_WEIGHTS[0] * b[i] as f32
                + BGR_WEIGHTS[1] * g[i] as f32
                + BGR_WEIGHTS[2] * r[i] as f32)
                / 256.0
        })
        .collect();
    ImageF32::from_raw(side, side, 1, data)
}
