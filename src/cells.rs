use std::convert::From;

use crate::units::{ColumnIndex, RowIndex, Width};

/// A position on the maze grid.
///
/// Signed so that neighbour arithmetic and queries just outside the grid (e.g. `(-1, 0)`)
/// are representable; validity is decided by the grid, not the coordinate.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: isize,
    pub y: isize,
}

impl Cartesian2DCoordinate {
    pub fn new(x: isize, y: isize) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as isize, row as isize)
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: Width) -> Self {
        let Width(width) = row_width;
        Cartesian2DCoordinate::new((index % width) as isize, (index / width) as isize)
    }

    /// The coordinate `steps` cells away in the given direction.
    #[inline]
    pub fn offset(self, dir: CompassPrimary, steps: isize) -> Cartesian2DCoordinate {
        let (dx, dy) = dir.unit_offset();
        Cartesian2DCoordinate::new(self.x + dx * steps, self.y + dy * steps)
    }
}

impl From<(isize, isize)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (isize, isize)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Passage,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Up, down, left, right. The generator shuffles a copy of this every iteration.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::West,
                                          CompassPrimary::East];

    /// Unit step in grid space, y grows southwards.
    #[inline]
    pub fn unit_offset(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_move_in_grid_space() {
        let c = Cartesian2DCoordinate::new(3, 3);
        assert_eq!(c.offset(CompassPrimary::North, 2), Cartesian2DCoordinate::new(3, 1));
        assert_eq!(c.offset(CompassPrimary::South, 2), Cartesian2DCoordinate::new(3, 5));
        assert_eq!(c.offset(CompassPrimary::West, 2), Cartesian2DCoordinate::new(1, 3));
        assert_eq!(c.offset(CompassPrimary::East, 1), Cartesian2DCoordinate::new(4, 3));
    }

    #[test]
    fn offsets_can_leave_the_positive_quadrant() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North, 2), Cartesian2DCoordinate::new(0, -2));
        assert_eq!(origin.offset(CompassPrimary::West, 1), Cartesian2DCoordinate::new(-1, 0));
    }

    #[test]
    fn row_major_index_conversion() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(0, Width(3)), gc(0, 0));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(4, Width(3)), gc(1, 1));
        assert_eq!(Cartesian2DCoordinate::from_row_major_index(8, Width(3)), gc(2, 2));
        assert_eq!(Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(2), RowIndex(1)),
                   gc(2, 1));
    }
}
