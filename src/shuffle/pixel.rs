//! Pixel shuffler ("shuffle in"): the same intra-pane permutation in every pane.
use crate::error::Result;
use crate::geometry::Geometry;
use crate::image::{ImageBuf, ImageView, ImageViewMut};
use crate::map::check_entries;

/// Inside every pane, output pixel `q` receives source pixel `map[q]` of the
/// same pane. No pixel crosses a pane boundary.
pub fn shuffle_pixels<T: Copy>(
    image: &ImageBuf<T>,
    geometry: &Geometry,
    map: &[usize],
) -> Result<ImageBuf<T>> {
    geometry.check_image(image)?;
    check_entries(map, geometry.inner_granularity())?;
    Ok(apply_pixels(image, geometry, map))
}

pub(crate) fn apply_pixels<T: Copy>(
    image: &ImageBuf<T>,
    geometry: &Geometry,
    map: &[usize],
) -> ImageBuf<T> {
    let offsets: Vec<((usize, usize), (usize, usize))> = map
        .iter()
        .enumerate()
        .filter(|&(dst, &src)| dst != src)
        .map(|(dst, &src)| (geometry.pixel_offset(dst), geometry.pixel_offset(src)))
        .collect();

    let mut out = image.clone();
    for p in 0..geometry.pane_count() {
        let (ox, oy) = geometry.pane_origin(p);
        for &((dx, dy), (sx, sy)) in &offsets {
            out.pixel_mut(ox + dx, oy + dy)
                .copy_from_slice(image.pixel(ox + sx, oy + sy));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShuffleError;

    #[test]
    fn transposes_each_pane_identically() {
        // 4x4 image, four 2x2 panes; map swaps the off-diagonal pixels.
        let img = ImageBuf::from_raw(4, 4, 1, (0u8..16).collect()).unwrap();
        let g = Geometry::new(2, 1).unwrap();
        let out = shuffle_pixels(&img, &g, &[0, 2, 1, 3]).unwrap();
        assert_eq!(out.row(0), &[0, 4, 2, 6]);
        assert_eq!(out.row(1), &[1, 5, 3, 7]);
        assert_eq!(out.row(2), &[8, 12, 10, 14]);
        assert_eq!(out.row(3), &[9, 13, 11, 15]);
    }

    #[test]
    fn pixel_level_panes_are_untouched() {
        // log_panes == log_dim: panes are single pixels, the only map is [0].
        let img = ImageBuf::from_raw(2, 2, 1, vec![4u8, 3, 2, 1]).unwrap();
        let g = Geometry::new(1, 1).unwrap();
        assert_eq!(shuffle_pixels(&img, &g, &[0]).unwrap(), img);
    }

    #[test]
    fn rejects_pane_sized_map() {
        let img = ImageBuf::<u8>::new(8, 8, 1);
        let g = Geometry::new(3, 1).unwrap();
        // inner granularity is 2 (16 entries); a 4-entry map is a caller error
        assert!(matches!(
            shuffle_pixels(&img, &g, &[1, 0, 3, 2]),
            Err(ShuffleError::InvalidMap(_))
        ));
    }
}
