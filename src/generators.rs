use log::{debug, trace};
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use crate::cells::{Cartesian2DCoordinate, CellState, CompassPrimary};
use crate::errors::*;
use crate::grid::MazeGrid;
use crate::units::{Height, Width};

/// Every maze is carved outwards from this cell.
pub const START: Cartesian2DCoordinate = Cartesian2DCoordinate { x: 1, y: 1 };

/// One iteration of the backtracking loop, as seen from the outside.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationStep {
    /// The start cell was carved and became the first current cell.
    Start { at: Cartesian2DCoordinate },
    /// `to` and the divider `wall` between it and `from` were carved. `to` is now current.
    Carve {
        from: Cartesian2DCoordinate,
        wall: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
    },
    /// `from` had no wall cell left two steps away in any direction and was popped.
    /// The search continues at `resume`, or is complete when that is `None`.
    Backtrack {
        from: Cartesian2DCoordinate,
        resume: Option<Cartesian2DCoordinate>,
    },
}

/// Generates a perfect maze with randomized depth first search and backtracking.
///
/// The passage cells always form a single tree rooted at `START`: a cell is only ever
/// entered while it is still a wall, so no carve can close a loop. Odd coordinates are
/// rooms and even coordinates are dividers, which is why both dimensions must be odd.
///
/// Each instance owns its random source. `new` seeds from OS entropy, `seeded` and
/// `with_rng` give reproducible mazes.
#[derive(Debug)]
pub struct MazeGenerator<R = SmallRng> {
    grid: MazeGrid,
    rng: R,
    stack: Vec<Cartesian2DCoordinate>,
    carves: usize,
    generated: bool,
}

impl MazeGenerator<SmallRng> {
    pub fn new(width: Width, height: Height) -> Result<MazeGenerator<SmallRng>> {
        MazeGenerator::with_rng(width, height, SmallRng::from_entropy())
    }

    pub fn seeded(width: Width, height: Height, seed: u64) -> Result<MazeGenerator<SmallRng>> {
        MazeGenerator::with_rng(width, height, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Rejects even dimensions and anything under 3, which would leave the odd lattice
    /// without a border or the start cell outside the grid.
    pub fn with_rng(width: Width, height: Height, rng: R) -> Result<MazeGenerator<R>> {
        validate_dimensions(width, height)?;

        Ok(MazeGenerator {
            grid: MazeGrid::new(width, height),
            rng,
            stack: Vec::new(),
            carves: 0,
            generated: false,
        })
    }

    /// Carve the whole maze in one go.
    ///
    /// A generator produces exactly one maze; calling this again fails with
    /// `ErrorKind::AlreadyGenerated` and leaves the grid as it is.
    pub fn generate(&mut self) -> Result<()> {
        self.steps()?.for_each(drop);
        Ok(())
    }

    /// Carve the maze incrementally, one loop iteration per call to `next`.
    ///
    /// Running the iterator to completion is equivalent to `generate`. Dropping it early
    /// leaves a smaller tree of passages, releases the backtracking stack and the generator
    /// still counts as used.
    pub fn steps(&mut self) -> Result<Steps<'_, R>> {
        if self.generated {
            return Err(ErrorKind::AlreadyGenerated.into());
        }
        self.generated = true;
        self.stack.clear();

        debug!("Generating {}x{} maze from {:?}",
               self.grid.width().0,
               self.grid.height().0,
               START);

        Ok(Steps {
            generator: self,
            started: false,
        })
    }

    #[inline]
    pub fn grid(&self) -> &MazeGrid {
        &self.grid
    }

    pub fn into_grid(self) -> MazeGrid {
        self.grid
    }

    /// False for walls and for anything outside the grid.
    #[inline]
    pub fn is_passage(&self, x: isize, y: isize) -> bool {
        self.grid.is_passage(Cartesian2DCoordinate::new(x, y))
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        self.grid.dimensions()
    }

    pub fn snapshot(&self) -> Vec<Vec<CellState>> {
        self.grid.snapshot()
    }

    /// Number of moves into a new cell. Each one opens two cells, the divider and the room.
    #[inline]
    pub fn carve_count(&self) -> usize {
        self.carves
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    fn carve_start(&mut self) -> GenerationStep {
        self.grid.carve(START);
        self.stack.push(START);
        trace!("start {:?}", START);
        GenerationStep::Start { at: START }
    }

    fn advance(&mut self) -> Option<GenerationStep> {
        let current = *self.stack.last()?;

        let mut directions = CompassPrimary::ALL;
        directions.shuffle(&mut self.rng);

        let grid = &self.grid;
        let target = directions.iter()
            .map(|&dir| (current.offset(dir, 1), current.offset(dir, 2)))
            .find(|&(_, to)| grid.is_wall(to));

        match target {
            Some((wall, to)) => {
                self.grid.carve(wall);
                self.grid.carve(to);
                self.stack.push(to);
                self.carves += 1;
                trace!("carve {:?} -> {:?}", current, to);

                Some(GenerationStep::Carve { from: current, wall, to })
            }
            None => {
                self.stack.pop();
                let resume = self.stack.last().cloned();
                trace!("backtrack {:?} -> {:?}", current, resume);

                if resume.is_none() {
                    debug!("Maze generation finished: {} carves, {} passage cells",
                           self.carves,
                           self.grid.passage_count());
                }

                Some(GenerationStep::Backtrack { from: current, resume })
            }
        }
    }
}

/// Incremental generation, see `MazeGenerator::steps`.
#[derive(Debug)]
pub struct Steps<'a, R> {
    generator: &'a mut MazeGenerator<R>,
    started: bool,
}

impl<'a, R: Rng> Iterator for Steps<'a, R> {
    type Item = GenerationStep;

    fn next(&mut self) -> Option<GenerationStep> {
        if !self.started {
            self.started = true;
            return Some(self.generator.carve_start());
        }
        self.generator.advance()
    }
}

// An abandoned walk cannot be resumed, so its stack is released with it.
impl<'a, R> Drop for Steps<'a, R> {
    fn drop(&mut self) {
        self.generator.stack.clear();
        self.generator.stack.shrink_to_fit();
    }
}

fn validate_dimensions(width: Width, height: Height) -> Result<()> {
    let is_valid_length = |length: usize| length >= 3 && length % 2 == 1;

    if is_valid_length(width.0) && is_valid_length(height.0) {
        Ok(())
    } else {
        Err(ErrorKind::InvalidDimensions(width.0, height.0).into())
    }
}
