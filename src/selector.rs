//! Random movie selection
//!
//! Picks one record uniformly from a decoded page and shapes it for display.

use rand::Rng;

use crate::models::{DisplayMovie, MovieRecord};

/// Smallest page that yields a selection. A single result is not treated as
/// a meaningful random pick.
pub const MIN_SELECTABLE: usize = 2;

/// Pick one record at random using the thread RNG
pub fn pick_random(records: &[MovieRecord]) -> Option<DisplayMovie> {
    pick_random_with(records, &mut rand::thread_rng())
}

/// Pick one record at random using the given RNG
pub fn pick_random_with<R: Rng + ?Sized>(
    records: &[MovieRecord],
    rng: &mut R,
) -> Option<DisplayMovie> {
    pick_index(records.len(), rng).map(|i| DisplayMovie::from(&records[i]))
}

/// Uniform index in `[0, len - 1]`, or `None` below [`MIN_SELECTABLE`]
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len < MIN_SELECTABLE {
        return None;
    }
    Some(rng.gen_range(0..=len - 1))
}
