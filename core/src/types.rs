use ndarray::Array2;

/// Single coordinate axis, used for row/column indices and board dimensions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`: `x` is the row, `y` the column.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Number of cells in the 3x3 block centered on `start`, clipped to the board.
///
/// This is 9 in the interior, 6 along an edge and 4 in a corner.
pub fn safe_zone_size(start: Coord2, size: Coord2) -> CellCount {
    let span = |center: Coord, len: Coord| -> CellCount {
        let lo = center.saturating_sub(1);
        let hi = center.saturating_add(1).min(len.saturating_sub(1));
        CellCount::from(hi - lo + 1)
    };
    span(start.0, size.0) * span(start.1, size.1)
}

/// Whether `coords` is `start` or one of its eight neighbors.
pub const fn in_safe_zone(coords: Coord2, start: Coord2) -> bool {
    coords.0.abs_diff(start.0) <= 1 && coords.1.abs_diff(start.1) <= 1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Row-major offsets of the eight neighbors.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// In-bounds neighbors of a cell, in row-major order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn neighbors_are_clipped_at_corners_and_edges() {
        assert_eq!(NeighborIter::new((0, 0), (6, 6)).count(), 3);
        assert_eq!(NeighborIter::new((0, 3), (6, 6)).count(), 5);
        assert_eq!(NeighborIter::new((3, 3), (6, 6)).count(), 8);
        assert_eq!(NeighborIter::new((5, 5), (6, 6)).count(), 3);
    }

    #[test]
    fn neighbors_come_in_row_major_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors,
            [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn safe_zone_size_matches_neighborhood() {
        let size = (10, 10);
        assert_eq!(safe_zone_size((0, 0), size), 4);
        assert_eq!(safe_zone_size((9, 9), size), 4);
        assert_eq!(safe_zone_size((0, 4), size), 6);
        assert_eq!(safe_zone_size((4, 9), size), 6);
        assert_eq!(safe_zone_size((4, 4), size), 9);

        for x in 0..size.0 {
            for y in 0..size.1 {
                let counted = NeighborIter::new((x, y), size).count() + 1;
                assert_eq!(usize::from(safe_zone_size((x, y), size)), counted);
            }
        }
    }

    #[test]
    fn safe_zone_membership() {
        assert!(in_safe_zone((0, 0), (1, 1)));
        assert!(in_safe_zone((2, 2), (1, 1)));
        assert!(!in_safe_zone((3, 1), (1, 1)));
        assert!(!in_safe_zone((1, 3), (1, 1)));
    }
}
