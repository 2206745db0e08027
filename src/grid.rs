use bit_set::BitSet;
use smallvec::SmallVec;
use std::fmt;

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::units::{ColumnIndex, Height, RowIndex, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// Fixed size rectangular store of wall/passage cells.
///
/// Only passages are recorded, as a bit per row major cell index. A cell can be carved
/// at most once and is never filled back in.
#[derive(Clone, PartialEq, Eq)]
pub struct MazeGrid {
    passages: BitSet,
    width: Width,
    height: Height,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MazeGrid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passage_count())
    }
}

impl MazeGrid {
    /// A grid with every cell a wall.
    pub fn new(width: Width, height: Height) -> MazeGrid {
        MazeGrid {
            passages: BitSet::with_capacity(width.0 * height.0),
            width,
            height,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid_coordinate_to_index(coord).is_some()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width.0 && y < self.height.0 {
            Some(y * self.width.0 + x)
        } else {
            None
        }
    }

    /// Out of bounds coordinates are not passages.
    #[inline]
    pub fn is_passage(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.passages.contains(index))
    }

    /// Out of bounds coordinates are not walls either, nothing can be carved there.
    #[inline]
    pub fn is_wall(&self, coord: Cartesian2DCoordinate) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| !self.passages.contains(index))
    }

    pub fn cell_state(&self, coord: Cartesian2DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| {
            if self.passages.contains(index) {
                CellState::Passage
            } else {
                CellState::Wall
            }
        })
    }

    /// Turn a wall into a passage. Returns true if the cell was a wall before the call.
    pub(crate) fn carve(&mut self, coord: Cartesian2DCoordinate) -> bool {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => self.passages.insert(index),
            None => false,
        }
    }

    /// Passage cells directly North, South, East or West of `coord`.
    pub fn passage_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .map(|&dir| coord.offset(dir, 1))
            .filter(|&neighbour| self.is_passage(neighbour))
            .collect()
    }

    /// Every coordinate in row major order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        let width = self.width;
        (0..self.size()).map(move |index| Cartesian2DCoordinate::from_row_major_index(index, width))
    }

    /// Cell states one row at a time, northmost row first.
    pub fn iter_row(&self) -> impl Iterator<Item = Vec<CellState>> + '_ {
        (0..self.height.0).map(move |row| {
            (0..self.width.0)
                .map(|column| {
                    let coord = Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column),
                                                                               RowIndex(row));
                    if self.is_passage(coord) {
                        CellState::Passage
                    } else {
                        CellState::Wall
                    }
                })
                .collect()
        })
    }

    /// Copy of the grid indexed `[row][column]`.
    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        self.iter_row().collect()
    }
}
