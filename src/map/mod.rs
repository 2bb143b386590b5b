//! Shuffle maps: bijections over the `(2^k)²` cells of a square grid.
//!
//! A map is applied as a gather: output cell `i` receives source cell
//! `map[i]`. Cells are numbered row-major. The same type serves both the
//! pane-level map (`k = log_panes`) and the intra-pane map
//! (`k = log_dim - log_panes`).

pub mod generate;
pub mod validate;

pub use self::generate::{generate_map, generate_map_with, MapSeeds};
pub use self::validate::{check_entries, expected_len, granularity_for_len, is_valid_map};

use crate::error::{Result, ShuffleError};
use serde::{Deserialize, Serialize};

/// A validated bijection at a fixed granularity. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShuffleMap", rename_all = "camelCase")]
pub struct ShuffleMap {
    granularity: u32,
    entries: Vec<usize>,
}

/// On-disk form: flat row-major entries or a nested `2^k × 2^k` grid, with
/// the granularity optional when it can be inferred from the size.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShuffleMap {
    #[serde(default)]
    granularity: Option<u32>,
    entries: RawEntries,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntries {
    Flat(Vec<usize>),
    Grid(Vec<Vec<usize>>),
}

impl TryFrom<RawShuffleMap> for ShuffleMap {
    type Error = ShuffleError;

    fn try_from(raw: RawShuffleMap) -> Result<Self> {
        let (flat, grid_side) = match raw.entries {
            RawEntries::Flat(v) => (v, None),
            RawEntries::Grid(rows) => {
                let side = rows.len();
                if rows.iter().any(|r| r.len() != side) {
                    return Err(ShuffleError::InvalidMap("grid rows are ragged".into()));
                }
                (rows.into_iter().flatten().collect(), Some(side))
            }
        };
        let k = match raw.granularity {
            Some(k) => k,
            None => granularity_for_len(flat.len()).ok_or_else(|| {
                ShuffleError::InvalidMap(format!(
                    "{} entries is not a power-of-two square",
                    flat.len()
                ))
            })?,
        };
        if let Some(side) = grid_side {
            if side != 1usize << k.min(usize::BITS - 1) {
                return Err(ShuffleError::InvalidMap(format!(
                    "grid side {side} does not match granularity {k}"
                )));
            }
        }
        Self::try_new(flat, k)
    }
}

impl ShuffleMap {
    /// Build a map, failing with `InvalidMap` on any size or bijection error.
    pub fn try_new(entries: Vec<usize>, granularity: u32) -> Result<Self> {
        check_entries(&entries, granularity)?;
        Ok(Self::from_checked(granularity, entries))
    }

    /// Build from a `2^k × 2^k` grid given row by row.
    pub fn from_grid(rows: &[Vec<usize>], granularity: u32) -> Result<Self> {
        let side = 1usize << granularity.min(usize::BITS - 1);
        if rows.len() != side || rows.iter().any(|r| r.len() != side) {
            return Err(ShuffleError::InvalidMap(format!(
                "grid must be {side}x{side} for granularity {granularity}"
            )));
        }
        Self::try_new(rows.concat(), granularity)
    }

    pub(crate) fn from_checked(granularity: u32, entries: Vec<usize>) -> Self {
        debug_assert!(check_entries(&entries, granularity).is_ok());
        Self {
            granularity,
            entries,
        }
    }

    pub fn identity(granularity: u32) -> Result<Self> {
        let n = expected_len(granularity).ok_or_else(|| {
            ShuffleError::InvalidMap(format!("granularity {granularity} is too large"))
        })?;
        Ok(Self::from_checked(granularity, (0..n).collect()))
    }

    #[inline]
    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: even granularity 0 holds one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.entries
    }

    pub fn is_identity(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, &e)| i == e)
    }

    /// The map `inv` with `inv[self[i]] = i`; gathering with `self` and then
    /// with `inv` restores the original order.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0usize; self.entries.len()];
        for (i, &e) in self.entries.iter().enumerate() {
            inv[e] = i;
        }
        Self::from_checked(self.granularity, inv)
    }

    /// Single map equivalent to gathering with `self`, then with `next`.
    pub fn then(&self, next: &ShuffleMap) -> Result<Self> {
        if next.granularity != self.granularity {
            return Err(ShuffleError::InvalidMap(format!(
                "cannot compose granularity {} with {}",
                self.granularity, next.granularity
            )));
        }
        let entries = next.entries.iter().map(|&j| self.entries[j]).collect();
        Ok(Self::from_checked(self.granularity, entries))
    }

    /// Row-major `2^k × 2^k` grid form.
    pub fn to_grid(&self) -> Vec<Vec<usize>> {
        let side = 1usize << self.granularity;
        self.entries.chunks(side).map(<[usize]>::to_vec).collect()
    }

    /// Gather `src` through the map: `out[i] = src[self[i]]`.
    pub fn gather<T: Copy>(&self, src: &[T]) -> Result<Vec<T>> {
        if src.len() != self.entries.len() {
            return Err(ShuffleError::InvalidMap(format!(
                "map of {} entries applied to {} items",
                self.entries.len(),
                src.len()
            )));
        }
        Ok(self.entries.iter().map(|&j| src[j]).collect())
    }
}

impl AsRef<[usize]> for ShuffleMap {
    fn as_ref(&self) -> &[usize] {
        &self.entries
    }
}

#[cfg(test)]
mod tests;
