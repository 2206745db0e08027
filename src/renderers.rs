use std::io::Write;
use std::thread;
use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::cells::{Cartesian2DCoordinate, CellState};
use crate::errors::*;
use crate::generators::{GenerationStep, MazeGenerator, START};
use crate::grid::MazeGrid;
use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellKind {
    Wall,
    Path,
    Current,
    Visited,
    Start,
    End,
}

impl From<CellState> for CellKind {
    fn from(cell: CellState) -> CellKind {
        match cell {
            CellState::Wall => CellKind::Wall,
            CellState::Passage => CellKind::Path,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour { r, g, b, a }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Palette {
    pub wall: Colour,
    pub path: Colour,
    pub current: Colour,
    pub visited: Colour,
    pub start: Colour,
    pub end: Colour,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            wall: Colour::rgb(40, 40, 40),
            path: Colour::rgb(240, 240, 240),
            current: Colour::rgb(100, 200, 255),
            visited: Colour::rgb(200, 200, 255),
            start: Colour::rgb(100, 255, 100),
            end: Colour::rgb(255, 100, 100),
        }
    }
}

impl Palette {
    pub fn colour_for(&self, kind: CellKind) -> Colour {
        match kind {
            CellKind::Wall => self.wall,
            CellKind::Path => self.path,
            CellKind::Current => self.current,
            CellKind::Visited => self.visited,
            CellKind::Start => self.start,
            CellKind::End => self.end,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellDisplayState {
    pub kind: CellKind,
    pub colour: Colour,
}

pub const DEFAULT_CELL_PIXELS: u32 = 20;

/// What a renderer shows for every cell of the maze: its kind and colour.
///
/// Starts out all walls. Writes outside the maze are ignored.
#[derive(Debug, Clone)]
pub struct CellStates {
    width: Width,
    height: Height,
    cell_pixels: u32,
    palette: Palette,
    cells: Vec<CellDisplayState>,
}

impl CellStates {
    pub fn new(width: Width, height: Height) -> CellStates {
        CellStates::with_cell_pixels(width, height, DEFAULT_CELL_PIXELS)
    }

    pub fn with_cell_pixels(width: Width, height: Height, cell_pixels: u32) -> CellStates {
        let palette = Palette::default();
        let wall = CellDisplayState {
            kind: CellKind::Wall,
            colour: palette.wall,
        };
        CellStates {
            width,
            height,
            cell_pixels,
            palette,
            cells: vec![wall; width.0 * height.0],
        }
    }

    pub fn maze_width(&self) -> Width {
        self.width
    }

    pub fn maze_height(&self) -> Height {
        self.height
    }

    pub fn cell_pixels(&self) -> u32 {
        self.cell_pixels
    }

    /// Pixel size of a window showing the whole maze, saturating rather than wrapping.
    pub fn window_size(&self) -> (u64, u64) {
        let pixels = u64::from(self.cell_pixels);
        ((self.width.0 as u64).saturating_mul(pixels),
         (self.height.0 as u64).saturating_mul(pixels))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn cell(&self, x: isize, y: isize) -> Option<CellDisplayState> {
        self.index(x, y).map(|index| self.cells[index])
    }

    pub fn set_cell_state(&mut self, x: isize, y: isize, kind: CellKind) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = CellDisplayState {
                kind,
                colour: self.palette.colour_for(kind),
            };
        }
    }

    pub fn update_cell(&mut self, x: isize, y: isize, cell: CellState) {
        self.set_cell_state(x, y, CellKind::from(cell));
    }

    /// Reset every cell to the wall or path state of the grid. If the dimensions differ
    /// only the overlapping area is updated.
    pub fn update_maze(&mut self, grid: &MazeGrid) {
        for (y, row) in grid.iter_row().enumerate().take(self.height.0) {
            for (x, cell) in row.into_iter().enumerate().take(self.width.0) {
                self.update_cell(x as isize, y as isize, cell);
            }
        }
    }

    pub fn mark_start_end(&mut self, start: Cartesian2DCoordinate, end: Cartesian2DCoordinate) {
        self.set_cell_state(start.x, start.y, CellKind::Start);
        self.set_cell_state(end.x, end.y, CellKind::End);
    }

    pub fn set_wall_colour(&mut self, colour: Colour) {
        self.palette.wall = colour;
        self.recolour(CellKind::Wall);
    }

    pub fn set_path_colour(&mut self, colour: Colour) {
        self.palette.path = colour;
        self.recolour(CellKind::Path);
    }

    pub fn set_current_colour(&mut self, colour: Colour) {
        self.palette.current = colour;
        self.recolour(CellKind::Current);
    }

    pub fn set_visited_colour(&mut self, colour: Colour) {
        self.palette.visited = colour;
        self.recolour(CellKind::Visited);
    }

    /// Cells one row at a time, northmost first.
    pub fn rows(&self) -> impl Iterator<Item = &[CellDisplayState]> + '_ {
        self.cells.chunks(self.width.0)
    }

    fn recolour(&mut self, kind: CellKind) {
        let colour = self.palette.colour_for(kind);
        for cell in self.cells.iter_mut().filter(|cell| cell.kind == kind) {
            cell.colour = colour;
        }
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width.0 && (y as usize) < self.height.0 {
            Some(y as usize * self.width.0 + x as usize)
        } else {
            None
        }
    }
}

/// A visualization backend. The maze core never depends on a concrete one.
pub trait MazeRenderer {
    fn cell_states(&self) -> &CellStates;
    fn cell_states_mut(&mut self) -> &mut CellStates;

    fn initialize(&mut self) -> Result<()>;
    fn should_close(&self) -> bool;
    fn process_events(&mut self);
    fn clear(&mut self) -> Result<()>;
    fn render(&mut self) -> Result<()>;
    fn display(&mut self) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

/// The conventional exit, opposite corner room to `START`.
pub fn end_point(width: Width, height: Height) -> Cartesian2DCoordinate {
    Cartesian2DCoordinate::new(width.0 as isize - 2, height.0 as isize - 2)
}

/// Animate the generation on `renderer`, one frame per generation step.
///
/// The cell under consideration is drawn `Current` and cells that were backtracked out of
/// `Visited`. Stops early if the renderer wants to close. Either way the last frame shows
/// the carved grid with the start and end marked. Returns true if the maze was completed.
///
/// The generator is only consumed once the renderer has initialized. After that the
/// renderer is always closed, even when a frame fails, and the first error is returned.
pub fn replay<R, T>(generator: &mut MazeGenerator<R>, renderer: &mut T) -> Result<bool>
    where R: Rng,
          T: MazeRenderer + ?Sized
{
    renderer.initialize()?;

    let animated = animate(generator, renderer);
    let closed = renderer.close();
    let completed = animated?;
    closed?;
    Ok(completed)
}

fn animate<R, T>(generator: &mut MazeGenerator<R>, renderer: &mut T) -> Result<bool>
    where R: Rng,
          T: MazeRenderer + ?Sized
{
    let mut completed = false;
    for step in generator.steps()? {
        renderer.process_events();
        if renderer.should_close() {
            break;
        }

        let states = renderer.cell_states_mut();
        match step {
            GenerationStep::Start { at } => {
                states.set_cell_state(at.x, at.y, CellKind::Current);
            }
            GenerationStep::Carve { from, wall, to } => {
                states.set_cell_state(from.x, from.y, CellKind::Path);
                states.set_cell_state(wall.x, wall.y, CellKind::Path);
                states.set_cell_state(to.x, to.y, CellKind::Current);
            }
            GenerationStep::Backtrack { from, resume } => {
                states.set_cell_state(from.x, from.y, CellKind::Visited);
                match resume {
                    Some(next) => states.set_cell_state(next.x, next.y, CellKind::Current),
                    None => completed = true,
                }
            }
        }

        draw_frame(renderer)?;
    }

    let (width, height) = generator.dimensions();
    let states = renderer.cell_states_mut();
    states.update_maze(generator.grid());
    states.mark_start_end(START, end_point(width, height));
    draw_frame(renderer)?;

    debug!("Replay {}", if completed { "completed" } else { "stopped early" });
    Ok(completed)
}

fn draw_frame<T: MazeRenderer + ?Sized>(renderer: &mut T) -> Result<()> {
    renderer.clear()?;
    renderer.render()?;
    renderer.display()
}

const ANSI_HOME: &str = "\x1b[H";
const ANSI_CLEAR_SCREEN: &str = "\x1b[2J";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_HIDE_CURSOR: &str = "\x1b[?25l";
const ANSI_SHOW_CURSOR: &str = "\x1b[?25h";

/// Console backend, two characters per cell.
///
/// Plain mode draws glyph pairs; ansi mode paints cell backgrounds with the palette colours.
/// Ansi mode always redraws each frame in place, plain mode only with `redraw_in_place`,
/// otherwise frames are appended one after another. Text output has no input events, so it
/// only closes when `close` is called.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    states: CellStates,
    ansi: bool,
    redraw_in_place: bool,
    frame_delay: Option<Duration>,
    frame: String,
    initialized: bool,
    closed: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, width: Width, height: Height) -> TextRenderer<W> {
        TextRenderer {
            out,
            states: CellStates::new(width, height),
            ansi: false,
            redraw_in_place: false,
            frame_delay: None,
            frame: String::new(),
            initialized: false,
            closed: false,
        }
    }

    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Move the cursor home before each frame so the animation stays on one screen.
    pub fn redraw_in_place(mut self, redraw: bool) -> Self {
        self.redraw_in_place = redraw;
        self
    }

    pub fn frame_delay(mut self, delay: Option<Duration>) -> Self {
        self.frame_delay = delay;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn uses_cursor(&self) -> bool {
        self.ansi || self.redraw_in_place
    }

    fn glyphs(kind: CellKind) -> &'static str {
        match kind {
            CellKind::Wall => "##",
            CellKind::Path => "  ",
            CellKind::Current => "@@",
            CellKind::Visited => "..",
            CellKind::Start => "SS",
            CellKind::End => "EE",
        }
    }
}

impl<W: Write> MazeRenderer for TextRenderer<W> {
    fn cell_states(&self) -> &CellStates {
        &self.states
    }

    fn cell_states_mut(&mut self) -> &mut CellStates {
        &mut self.states
    }

    fn initialize(&mut self) -> Result<()> {
        if self.uses_cursor() {
            write!(self.out, "{}{}", ANSI_CLEAR_SCREEN, ANSI_HIDE_CURSOR)?;
        }
        self.initialized = true;
        self.closed = false;
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.closed
    }

    fn process_events(&mut self) {}

    fn clear(&mut self) -> Result<()> {
        self.frame.clear();
        if self.uses_cursor() {
            self.frame.push_str(ANSI_HOME);
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(ErrorKind::Renderer(String::from("render before initialize")).into());
        }

        for row in self.states.rows() {
            for cell in row {
                if self.ansi {
                    let Colour { r, g, b, .. } = cell.colour;
                    self.frame.push_str(&format!("\x1b[48;2;{};{};{}m  ", r, g, b));
                } else {
                    self.frame.push_str(TextRenderer::<W>::glyphs(cell.kind));
                }
            }
            if self.ansi {
                self.frame.push_str(ANSI_RESET);
            }
            self.frame.push('\n');
        }
        Ok(())
    }

    fn display(&mut self) -> Result<()> {
        self.out.write_all(self.frame.as_bytes())?;
        self.out.flush()?;
        if let Some(delay) = self.frame_delay {
            thread::sleep(delay);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.uses_cursor() && !self.closed {
            write!(self.out, "{}{}", ANSI_RESET, ANSI_SHOW_CURSOR)?;
            self.out.flush()?;
        }
        self.closed = true;
        Ok(())
    }
}
