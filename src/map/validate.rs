//! Well-formedness checks for candidate shuffle maps.
//!
//! A map at granularity `k` must hold exactly `(2^k)²` entries forming a
//! bijection on `0..(2^k)²`. Maps of any other size are rejected, never
//! truncated or padded.
use crate::error::{Result, ShuffleError};
use crate::geometry::MAX_LOG_DIM;

/// Number of entries a map at granularity `k` must hold, if representable.
pub fn expected_len(k: u32) -> Option<usize> {
    if k > MAX_LOG_DIM {
        return None;
    }
    let side = 1usize << k;
    side.checked_mul(side)
}

/// Granularity whose expected length is `len`, if any.
pub fn granularity_for_len(len: usize) -> Option<u32> {
    (0..=MAX_LOG_DIM).find(|&k| expected_len(k) == Some(len))
}

/// Strict check with a descriptive `InvalidMap` on failure.
pub fn check_entries(entries: &[usize], k: u32) -> Result<()> {
    let n = expected_len(k).ok_or_else(|| {
        ShuffleError::InvalidMap(format!("granularity {k} exceeds {MAX_LOG_DIM}"))
    })?;
    if entries.len() != n {
        return Err(ShuffleError::InvalidMap(format!(
            "granularity {k} needs {n} entries, got {}",
            entries.len()
        )));
    }
    let mut seen = vec![false; n];
    for (i, &e) in entries.iter().enumerate() {
        if e >= n {
            return Err(ShuffleError::InvalidMap(format!(
                "entry {i} = {e} out of range 0..{n}"
            )));
        }
        if std::mem::replace(&mut seen[e], true) {
            return Err(ShuffleError::InvalidMap(format!(
                "entry {i} repeats value {e}"
            )));
        }
    }
    // n distinct values below n cover the whole range.
    Ok(())
}

/// True iff `candidate` is present and a bijection of the exact size for `k`.
///
/// An absent map is the ordinary "no permutation requested" case and simply
/// yields `false`.
pub fn is_valid_map(candidate: Option<&[usize]>, k: u32) -> bool {
    candidate.is_some_and(|entries| check_entries(entries, k).is_ok())
}
