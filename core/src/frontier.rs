use alloc::collections::BTreeSet;

use crate::*;

/// Cells that are not explored yet but touch at least one explored cell.
pub type Frontier = BTreeSet<Coord2>;

/// Recomputes the frontier of `markers` from scratch.
pub fn scan_frontier(markers: &MarkerGrid) -> Frontier {
    markers
        .iter()
        .filter(|&(coords, marker)| {
            !marker.is_explored()
                && markers
                    .iter_neighbors(coords)
                    .any(|pos| markers.is_explored(pos))
        })
        .map(|(coords, _)| coords)
        .collect()
}
