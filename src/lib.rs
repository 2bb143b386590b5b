#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod geometry;
pub mod image;
pub mod map;
pub mod normalize;
pub mod shuffle;

// Supporting modules for experiments and tools.
pub mod config;
pub mod data;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, ShuffleError};
pub use crate::geometry::Geometry;
pub use crate::map::{generate_map, is_valid_map, MapSeeds, ShuffleMap};
pub use crate::normalize::{pow2_dimensions, Normalized, PadMode};
pub use crate::shuffle::{shuffle, shuffle_panes, shuffle_pixels, unshuffle, ShufflePlan};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use pane_shuffle::prelude::*;
///
/// # fn main() -> pane_shuffle::Result<()> {
/// let img = ImageU8::new(28, 28, 1);
/// let normalized = pow2_dimensions(&img, PadMode::Zero)?;
/// let plan = ShufflePlan::random(Geometry::new(normalized.log_dim, 1)?, Some(7), Some(8))?;
///
/// let shuffled = plan.apply(&normalized.image)?;
/// assert_eq!(plan.undo(&shuffled)?, normalized.image);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageBuf, ImageF32, ImageU8, ImageView};
    pub use crate::{pow2_dimensions, Geometry, PadMode, ShuffleMap, ShufflePlan};
}
