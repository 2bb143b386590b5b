//! Pane shuffler ("shuffle out"): relocates whole panes, interiors untouched.
use crate::error::{Result, ShuffleError};
use crate::geometry::Geometry;
use crate::image::{ImageBuf, ImageView, ImageViewMut};
use crate::map::check_entries;

/// Output pane `i` receives source pane `map[i]`.
///
/// Fails with `InvalidDimension` if `image` is not `geometry.side()` square and
/// with `InvalidMap` unless `map` is a bijection at granularity `log_panes`.
pub fn shuffle_panes<T: Copy>(
    image: &ImageBuf<T>,
    geometry: &Geometry,
    map: &[usize],
) -> Result<ImageBuf<T>> {
    geometry.check_image(image)?;
    check_entries(map, geometry.outer_granularity())?;
    Ok(apply_panes(image, geometry, map))
}

/// Caller guarantees the image and map match `geometry`.
pub(crate) fn apply_panes<T: Copy>(
    image: &ImageBuf<T>,
    geometry: &Geometry,
    map: &[usize],
) -> ImageBuf<T> {
    let c = image.channels;
    let run = geometry.pane_side() * c;
    let mut out = image.clone();
    for (dst_pane, &src_pane) in map.iter().enumerate() {
        if dst_pane == src_pane {
            continue;
        }
        let (dx, dy) = geometry.pane_origin(dst_pane);
        let (sx, sy) = geometry.pane_origin(src_pane);
        for r in 0..geometry.pane_side() {
            let src = &image.row(sy + r)[sx * c..sx * c + run];
            out.row_mut(dy + r)[dx * c..dx * c + run].copy_from_slice(src);
        }
    }
    out
}

/// Copy of pane `p` as a standalone `pane_side × pane_side` image.
pub fn extract_pane<T: Copy>(
    image: &ImageBuf<T>,
    geometry: &Geometry,
    p: usize,
) -> Result<ImageBuf<T>> {
    geometry.check_image(image)?;
    if p >= geometry.pane_count() {
        return Err(ShuffleError::InvalidDimension(format!(
            "pane {p} out of range 0..{}",
            geometry.pane_count()
        )));
    }
    let c = image.channels;
    let s = geometry.pane_side();
    let (ox, oy) = geometry.pane_origin(p);
    let mut data = Vec::with_capacity(s * s * c);
    for r in 0..s {
        data.extend_from_slice(&image.row(oy + r)[ox * c..(ox + s) * c]);
    }
    ImageBuf::from_raw(s, s, c, data)
}
