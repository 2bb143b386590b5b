//! Dimension normalizer: pads an arbitrary image to a power-of-two square.
//!
//! The source is anchored at the top-left corner and never resampled, so
//! `ImageBuf::crop(original_w, original_h)` recovers it exactly. The area to
//! the right and below is filled according to [`PadMode`].
use crate::error::{Result, ShuffleError};
use crate::geometry::MAX_LOG_DIM;
use crate::image::{ImageBuf, ImageView, ImageViewMut};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Fill with `T::default()` (zero intensity).
    #[default]
    Zero,
    /// Replicate the nearest border pixel.
    Edge,
}

#[derive(Clone, Debug)]
pub struct Normalized<T> {
    pub image: ImageBuf<T>,
    pub log_dim: u32,
    /// Width and height before padding.
    pub original: (usize, usize),
}

/// Smallest `k` with `2^k >= n`.
pub fn ceil_log2(n: usize) -> u32 {
    n.next_power_of_two().trailing_zeros()
}

/// Pad `image` to the smallest power-of-two square whose side covers both
/// dimensions, e.g. 28×28 → 32×32.
pub fn pow2_dimensions<I>(image: &I, pad: PadMode) -> Result<Normalized<I::Pixel>>
where
    I: ImageView,
    I::Pixel: Default,
{
    let (w, h, channels) = (image.width(), image.height(), image.channels());
    if w == 0 || h == 0 || channels == 0 {
        return Err(ShuffleError::InvalidDimension(format!(
            "{w}x{h}x{channels} has a zero extent"
        )));
    }
    let log_dim = ceil_log2(w.max(h));
    if log_dim > MAX_LOG_DIM {
        return Err(ShuffleError::InvalidDimension(format!(
            "{w}x{h} exceeds the largest supported side {}",
            1usize << MAX_LOG_DIM
        )));
    }
    let side = 1usize << log_dim;
    debug!("normalize: {w}x{h} -> {side}x{side} ({pad:?} padding)");

    let mut out = ImageBuf::<I::Pixel>::new(side, side, channels);
    let row_len = w * channels;
    for y in 0..side {
        let src_y = match pad {
            PadMode::Zero if y >= h => break,
            PadMode::Zero => y,
            PadMode::Edge => y.min(h - 1),
        };
        let src = image.row(src_y);
        let dst = out.row_mut(y);
        dst[..row_len].copy_from_slice(&src[..row_len]);
        if pad == PadMode::Edge {
            let last = &src[row_len - channels..row_len];
            for px in dst[row_len..].chunks_exact_mut(channels) {
                px.copy_from_slice(last);
            }
        }
    }

    Ok(Normalized {
        image: out,
        log_dim,
        original: (w, h),
    })
}
