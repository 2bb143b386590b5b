//! Orchestration of the two permutation phases.
//!
//! The forward order is fixed: pane shuffle first, then pixel shuffle. The
//! inverse runs the inverse pixel shuffle first, then the inverse pane
//! shuffle. Each call is stateless and returns a new image.

pub mod pane;
pub mod pixel;
pub mod plan;

pub use self::pane::{extract_pane, shuffle_panes};
pub use self::pixel::shuffle_pixels;
pub use self::plan::ShufflePlan;

use crate::error::{Result, ShuffleError};
use crate::geometry::Geometry;
use crate::image::ImageBuf;
use crate::map::{check_entries, granularity_for_len, is_valid_map, ShuffleMap};
use log::debug;
use std::borrow::Cow;

/// Returns the candidate only when it is a well-formed map at granularity `k`.
///
/// Absent or malformed candidates yield `Ok(None)`. A bijection sized for some
/// other granularity belongs to a different geometry and is an `InvalidMap`.
fn requested(candidate: Option<&[usize]>, k: u32) -> Result<Option<&[usize]>> {
    let Some(map) = candidate else {
        return Ok(None);
    };
    if is_valid_map(Some(map), k) {
        return Ok(Some(map));
    }
    match granularity_for_len(map.len()) {
        Some(j) if j != k && check_entries(map, j).is_ok() => Err(ShuffleError::InvalidMap(
            format!("map of granularity {j} applied at granularity {k}"),
        )),
        _ => Ok(None),
    }
}

/// Permute `image` (side `2^log_dim`) with the requested phases.
///
/// `out_map` drives the pane shuffle at granularity `log_panes`, `in_map` the
/// pixel shuffle at granularity `log_dim - log_panes`. A map that is absent or
/// malformed skips its phase. A valid map built for another granularity is an
/// `InvalidMap`, as are a mismatched image side and inconsistent granularities.
pub fn shuffle<T: Copy>(
    image: &ImageBuf<T>,
    log_dim: u32,
    log_panes: u32,
    in_map: Option<&[usize]>,
    out_map: Option<&[usize]>,
) -> Result<ImageBuf<T>> {
    let geometry = Geometry::new(log_dim, log_panes)?;
    geometry.check_image(image)?;

    let mut current = Cow::Borrowed(image);
    match requested(out_map, geometry.outer_granularity())? {
        Some(map) => current = Cow::Owned(pane::apply_panes(&current, &geometry, map)),
        None => debug!("shuffle: pane phase skipped (log_panes={log_panes})"),
    }
    match requested(in_map, geometry.inner_granularity())? {
        Some(map) => current = Cow::Owned(pixel::apply_pixels(&current, &geometry, map)),
        None => debug!(
            "shuffle: pixel phase skipped (granularity={})",
            geometry.inner_granularity()
        ),
    }
    Ok(current.into_owned())
}

/// Exact inverse of [`shuffle`] called with the same arguments.
pub fn unshuffle<T: Copy>(
    image: &ImageBuf<T>,
    log_dim: u32,
    log_panes: u32,
    in_map: Option<&[usize]>,
    out_map: Option<&[usize]>,
) -> Result<ImageBuf<T>> {
    let geometry = Geometry::new(log_dim, log_panes)?;
    geometry.check_image(image)?;
    let inverse = |m: &[usize], k: u32| ShuffleMap::from_checked(k, m.to_vec()).inverse();

    let mut current = Cow::Borrowed(image);
    if let Some(map) = requested(in_map, geometry.inner_granularity())? {
        let inv = inverse(map, geometry.inner_granularity());
        current = Cow::Owned(pixel::apply_pixels(&current, &geometry, inv.as_slice()));
    }
    if let Some(map) = requested(out_map, geometry.outer_granularity())? {
        let inv = inverse(map, geometry.outer_granularity());
        current = Cow::Owned(pane::apply_panes(&current, &geometry, inv.as_slice()));
    }
    Ok(current.into_owned())
}
