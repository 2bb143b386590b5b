//! Diagnostics data model returned alongside shuffled images.
//!
//! `ShuffleTrace` records which phases ran, the geometry they ran at and how
//! long each took. Tools serialize it next to the permuted output.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::geometry::Geometry;
use serde::Serialize;

/// Which orchestrator phase a trace entry refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Whole-pane relocation.
    Panes,
    /// Identical intra-pane pixel permutation.
    Pixels,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleTrace {
    pub input: InputDescriptor,
    pub geometry: Geometry,
    /// Phases in the order they were applied.
    pub applied: Vec<Phase>,
    pub timings: TimingBreakdown,
}
