//! Strict, reusable shuffle configuration for an experiment.
//!
//! Unlike [`super::shuffle`], a plan treats a map of the wrong granularity as
//! a configuration error: it is rejected when the plan is built. Maps are
//! generated once, outside the per-image path, and shared read-only across
//! every image and worker thread.
use super::{pane, pixel};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, Phase, ShuffleTrace, TimingBreakdown};
use crate::error::{Result, ShuffleError};
use crate::geometry::Geometry;
use crate::image::ImageBuf;
use crate::map::{generate_map, ShuffleMap};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShufflePlan {
    geometry: Geometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    outer: Option<ShuffleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inner: Option<ShuffleMap>,
}

impl ShufflePlan {
    /// `outer` must have granularity `log_panes`, `inner` granularity
    /// `log_dim - log_panes`; anything else is `InvalidMap`.
    pub fn new(
        geometry: Geometry,
        outer: Option<ShuffleMap>,
        inner: Option<ShuffleMap>,
    ) -> Result<Self> {
        check_granularity("outer", outer.as_ref(), geometry.outer_granularity())?;
        check_granularity("inner", inner.as_ref(), geometry.inner_granularity())?;
        Ok(Self {
            geometry,
            outer,
            inner,
        })
    }

    /// Generate the maps whose seed is given; each phase is seeded on its own.
    pub fn random(
        geometry: Geometry,
        outer_seed: Option<u64>,
        inner_seed: Option<u64>,
    ) -> Result<Self> {
        let outer = outer_seed
            .map(|s| generate_map(geometry.outer_granularity(), s))
            .transpose()?;
        let inner = inner_seed
            .map(|s| generate_map(geometry.inner_granularity(), s))
            .transpose()?;
        Self::new(geometry, outer, inner)
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    pub fn outer(&self) -> Option<&ShuffleMap> {
        self.outer.as_ref()
    }
    pub fn inner(&self) -> Option<&ShuffleMap> {
        self.inner.as_ref()
    }

    /// Inverse (outer, inner) maps; only meaningful when run in reverse order.
    fn inverted_maps(&self) -> (Option<ShuffleMap>, Option<ShuffleMap>) {
        (
            self.outer.as_ref().map(ShuffleMap::inverse),
            self.inner.as_ref().map(ShuffleMap::inverse),
        )
    }

    /// Pane phase, then pixel phase.
    pub fn apply<T: Copy>(&self, image: &ImageBuf<T>) -> Result<ImageBuf<T>> {
        self.apply_with_trace(image).map(|(out, _)| out)
    }

    /// Like [`apply`](Self::apply), also returning which phases ran and their timings.
    pub fn apply_with_trace<T: Copy>(
        &self,
        image: &ImageBuf<T>,
    ) -> Result<(ImageBuf<T>, ShuffleTrace)> {
        let total_start = Instant::now();
        self.geometry.check_image(image)?;
        let mut timings = TimingBreakdown::default();
        let mut applied = Vec::new();
        let mut out = image.clone();

        if let Some(map) = &self.outer {
            let start = Instant::now();
            out = pane::apply_panes(&out, &self.geometry, map.as_slice());
            timings.push("panes", elapsed_ms(start));
            applied.push(Phase::Panes);
        }
        if let Some(map) = &self.inner {
            let start = Instant::now();
            out = pixel::apply_pixels(&out, &self.geometry, map.as_slice());
            timings.push("pixels", elapsed_ms(start));
            applied.push(Phase::Pixels);
        }
        timings.total_ms = elapsed_ms(total_start);

        let trace = ShuffleTrace {
            input: InputDescriptor {
                width: image.w,
                height: image.h,
                channels: image.channels,
            },
            geometry: self.geometry,
            applied,
            timings,
        };
        Ok((out, trace))
    }

    /// Inverse pixel phase, then inverse pane phase.
    pub fn undo<T: Copy>(&self, image: &ImageBuf<T>) -> Result<ImageBuf<T>> {
        self.geometry.check_image(image)?;
        let (outer_inv, inner_inv) = self.inverted_maps();
        let mut out = image.clone();
        if let Some(inv) = &inner_inv {
            out = pixel::apply_pixels(&out, &self.geometry, inv.as_slice());
        }
        if let Some(inv) = &outer_inv {
            out = pane::apply_panes(&out, &self.geometry, inv.as_slice());
        }
        Ok(out)
    }

    /// Apply the same plan to every image of a batch in parallel.
    ///
    /// Either every image is transformed or the first error is returned.
    pub fn apply_batch<T>(&self, images: &[ImageBuf<T>]) -> Result<Vec<ImageBuf<T>>>
    where
        T: Copy + Send + Sync,
    {
        debug!(
            "ShufflePlan::apply_batch images={} geometry={:?}",
            images.len(),
            self.geometry
        );
        images.par_iter().map(|img| self.apply(img)).collect()
    }

    /// Parallel counterpart of [`undo`](Self::undo).
    pub fn undo_batch<T>(&self, images: &[ImageBuf<T>]) -> Result<Vec<ImageBuf<T>>>
    where
        T: Copy + Send + Sync,
    {
        images.par_iter().map(|img| self.undo(img)).collect()
    }
}

fn check_granularity(which: &str, map: Option<&ShuffleMap>, expected: u32) -> Result<()> {
    match map {
        Some(m) if m.granularity() != expected => Err(ShuffleError::InvalidMap(format!(
            "{which} map has granularity {}, geometry needs {expected}",
            m.granularity()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(side: usize) -> ImageBuf<u16> {
        ImageBuf::from_raw(side, side, 1, (0..(side * side) as u16).collect()).unwrap()
    }

    #[test]
    fn rejects_swapped_maps() {
        let g = Geometry::new(3, 1).unwrap();
        let outer = ShuffleMap::identity(1).unwrap();
        let inner = ShuffleMap::identity(2).unwrap();
        assert!(ShufflePlan::new(g, Some(outer.clone()), Some(inner.clone())).is_ok());
        assert!(matches!(
            ShufflePlan::new(g, Some(inner), Some(outer)),
            Err(ShuffleError::InvalidMap(_))
        ));
    }

    #[test]
    fn undo_inverts_apply() {
        let g = Geometry::new(4, 2).unwrap();
        let plan = ShufflePlan::random(g, Some(1), Some(2)).unwrap();
        let img = ramp(16);
        let fwd = plan.apply(&img).unwrap();
        assert_eq!(plan.undo(&fwd).unwrap(), img);
    }

    #[test]
    fn trace_lists_phases_in_order() {
        let g = Geometry::new(3, 1).unwrap();
        let plan = ShufflePlan::random(g, Some(5), Some(6)).unwrap();
        let (_, trace) = plan.apply_with_trace(&ramp(8)).unwrap();
        assert_eq!(trace.applied, vec![Phase::Panes, Phase::Pixels]);
        assert_eq!(trace.timings.stages.len(), 2);

        let plan = ShufflePlan::random(g, None, Some(6)).unwrap();
        let (_, trace) = plan.apply_with_trace(&ramp(8)).unwrap();
        assert_eq!(trace.applied, vec![Phase::Pixels]);
    }

    #[test]
    fn batch_matches_sequential() {
        let g = Geometry::new(3, 1).unwrap();
        let plan = ShufflePlan::random(g, Some(10), Some(20)).unwrap();
        let batch: Vec<_> = (0..8)
            .map(|k| {
                ImageBuf::from_raw(8, 8, 1, (0..64u16).map(|v| v * (k + 1)).collect()).unwrap()
            })
            .collect();
        let par = plan.apply_batch(&batch).unwrap();
        for (img, out) in batch.iter().zip(&par) {
            assert_eq!(&plan.apply(img).unwrap(), out);
        }
        assert_eq!(plan.undo_batch(&par).unwrap(), batch);
    }

    #[test]
    fn batch_fails_as_a_whole() {
        let g = Geometry::new(3, 1).unwrap();
        let plan = ShufflePlan::random(g, Some(1), None).unwrap();
        let batch = vec![ramp(8), ramp(4)];
        assert!(matches!(
            plan.apply_batch(&batch),
            Err(ShuffleError::InvalidDimension(_))
        ));
    }
}
