//! Pane layout of a square power-of-two image.
//!
//! An image of side `2^log_dim` is split into `2^log_panes × 2^log_panes`
//! panes of side `2^(log_dim - log_panes)`. Panes are numbered row-major
//! across the image and pixels row-major inside a pane.
use crate::error::{Result, ShuffleError};
use crate::image::ImageView;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry", rename_all = "camelCase")]
pub struct Geometry {
    log_dim: u32,
    log_panes: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeometry {
    log_dim: i64,
    log_panes: i64,
}

impl TryFrom<RawGeometry> for Geometry {
    type Error = ShuffleError;

    fn try_from(raw: RawGeometry) -> Result<Self> {
        Self::from_signed(raw.log_dim, raw.log_panes)
    }
}

/// Sides beyond this would overflow pixel counts on 32-bit targets.
pub const MAX_LOG_DIM: u32 = 15;

impl Geometry {
    pub fn new(log_dim: u32, log_panes: u32) -> Result<Self> {
        if log_dim > MAX_LOG_DIM {
            return Err(ShuffleError::InvalidDimension(format!(
                "log_dim {log_dim} exceeds the largest supported side 2^{MAX_LOG_DIM}"
            )));
        }
        if log_panes > log_dim {
            return Err(ShuffleError::GranularityMismatch {
                log_dim: log_dim as i64,
                log_panes: log_panes as i64,
            });
        }
        Ok(Self { log_dim, log_panes })
    }

    /// Accepts signed inputs as they arrive from configs; negatives are rejected.
    pub fn from_signed(log_dim: i64, log_panes: i64) -> Result<Self> {
        match (u32::try_from(log_dim), u32::try_from(log_panes)) {
            (Ok(d), Ok(p)) => Self::new(d, p),
            _ => Err(ShuffleError::GranularityMismatch { log_dim, log_panes }),
        }
    }

    /// Geometry of an already normalized image.
    pub fn for_image<I: ImageView>(image: &I, log_panes: u32) -> Result<Self> {
        let log_dim = log_side(image)?;
        Self::new(log_dim, log_panes)
    }

    #[inline]
    pub fn log_dim(&self) -> u32 {
        self.log_dim
    }
    #[inline]
    pub fn log_panes(&self) -> u32 {
        self.log_panes
    }
    /// Granularity of the pane-level map.
    #[inline]
    pub fn outer_granularity(&self) -> u32 {
        self.log_panes
    }
    /// Granularity of the intra-pane map.
    #[inline]
    pub fn inner_granularity(&self) -> u32 {
        self.log_dim - self.log_panes
    }
    #[inline]
    pub fn side(&self) -> usize {
        1 << self.log_dim
    }
    #[inline]
    pub fn panes_per_side(&self) -> usize {
        1 << self.log_panes
    }
    #[inline]
    pub fn pane_side(&self) -> usize {
        1 << self.inner_granularity()
    }
    #[inline]
    pub fn pane_count(&self) -> usize {
        self.panes_per_side() * self.panes_per_side()
    }
    #[inline]
    pub fn pane_pixels(&self) -> usize {
        self.pane_side() * self.pane_side()
    }

    /// Top-left pixel (x, y) of pane `p`.
    #[inline]
    pub fn pane_origin(&self, p: usize) -> (usize, usize) {
        let n = self.panes_per_side();
        let s = self.pane_side();
        ((p % n) * s, (p / n) * s)
    }

    /// Local offset (dx, dy) of pixel `q` inside any pane.
    #[inline]
    pub fn pixel_offset(&self, q: usize) -> (usize, usize) {
        let s = self.pane_side();
        (q % s, q / s)
    }

    /// Pane index and in-pane pixel index of image pixel (x, y).
    #[inline]
    pub fn locate(&self, x: usize, y: usize) -> (usize, usize) {
        let s = self.pane_side();
        let pane = (y / s) * self.panes_per_side() + x / s;
        let pixel = (y % s) * s + x % s;
        (pane, pixel)
    }

    /// Fails with `InvalidDimension` unless `image` is `side × side`.
    pub fn check_image<I: ImageView>(&self, image: &I) -> Result<()> {
        let side = self.side();
        if image.width() != side || image.height() != side {
            return Err(ShuffleError::InvalidDimension(format!(
                "image is {}x{}, geometry expects {side}x{side}",
                image.width(),
                image.height()
            )));
        }
        Ok(())
    }
}

/// log2 of the side of a square power-of-two image.
pub fn log_side<I: ImageView>(image: &I) -> Result<u32> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || w != h || !w.is_power_of_two() {
        return Err(ShuffleError::InvalidDimension(format!(
            "{w}x{h} is not a power-of-two square"
        )));
    }
    Ok(w.trailing_zeros())
}
