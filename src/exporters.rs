use std::fmt;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::cells::CellState;
use crate::errors::*;
use crate::grid::MazeGrid;

/// How a grid is written out as text: one glyph per cell, cells separated by `delimiter`,
/// one row per line.
///
/// The delimiter only goes between glyphs, a row never ends with it. Files are therefore
/// not byte for byte the same as layouts that write the delimiter after every cell
/// (`"# # # "`): each line here is one delimiter shorter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    pub wall_glyph: char,
    pub passage_glyph: char,
    pub delimiter: String,
}

impl Default for TextFormat {
    fn default() -> TextFormat {
        TextFormat {
            wall_glyph: '#',
            passage_glyph: '.',
            delimiter: String::from(" "),
        }
    }
}

impl TextFormat {
    #[inline]
    pub fn glyph(&self, cell: CellState) -> char {
        match cell {
            CellState::Wall => self.wall_glyph,
            CellState::Passage => self.passage_glyph,
        }
    }

    pub fn render_row(&self, row: &[CellState]) -> String {
        row.iter().map(|&cell| self.glyph(cell)).join(&self.delimiter)
    }
}

pub fn write_text<W: Write>(grid: &MazeGrid, format: &TextFormat, out: W) -> Result<()> {
    write_rows(grid, format, out)?;
    Ok(())
}

pub fn render_text(grid: &MazeGrid, format: &TextFormat) -> String {
    grid.iter_row()
        .map(|row| format.render_row(&row) + "\n")
        .collect()
}

pub fn print(grid: &MazeGrid, format: &TextFormat) -> Result<()> {
    let stdout = io::stdout();
    write_text(grid, format, stdout.lock())
}

/// Write the maze to `path`, creating or truncating the file.
///
/// Failures come back as `ErrorKind::Export` naming the path, chained to the io error.
pub fn save_to_file<P: AsRef<Path>>(grid: &MazeGrid, format: &TextFormat, path: P) -> Result<()> {
    let path = path.as_ref();

    File::create(path)
        .and_then(|file| write_rows(grid, format, BufWriter::new(file)))
        .chain_err(|| ErrorKind::Export(path.display().to_string()))?;

    debug!("Saved {:?} to {}", grid, path.display());
    Ok(())
}

fn write_rows<W: Write>(grid: &MazeGrid, format: &TextFormat, mut out: W) -> io::Result<()> {
    for row in grid.iter_row() {
        writeln!(out, "{}", format.render_row(&row))?;
    }
    out.flush()
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_text(self, &TextFormat::default()))
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::process;

    use super::*;
    use crate::generators::MazeGenerator;
    use crate::units::{Height, Width};

    fn smallest_maze() -> MazeGrid {
        let mut generator = MazeGenerator::seeded(Width(3), Height(3), 0).unwrap();
        generator.generate().unwrap();
        generator.into_grid()
    }

    #[test]
    fn default_text_layout() {
        let text = render_text(&smallest_maze(), &TextFormat::default());
        assert_eq!(text, "# # #\n# . #\n# # #\n");
    }

    #[test]
    fn custom_glyphs_and_delimiter() {
        let format = TextFormat {
            wall_glyph: '█',
            passage_glyph: ' ',
            delimiter: String::new(),
        };
        let text = render_text(&smallest_maze(), &format);
        assert_eq!(text, "███\n█ █\n███\n");
    }

    #[test]
    fn rows_do_not_end_with_the_delimiter() {
        let mut generator = MazeGenerator::seeded(Width(7), Height(5), 8).unwrap();
        generator.generate().unwrap();
        let format = TextFormat {
            delimiter: String::from(", "),
            ..TextFormat::default()
        };

        let text = render_text(generator.grid(), &format);
        assert_eq!(text.lines().count(), 5);
        for line in text.lines() {
            assert!(!line.ends_with(' ') && !line.ends_with(','));
            assert_eq!(line.matches(", ").count(), 6);
            assert_eq!(line.chars().count(), 7 + 2 * 6);
        }
    }

    #[test]
    fn display_uses_default_format() {
        let grid = smallest_maze();
        assert_eq!(format!("{}", grid), render_text(&grid, &TextFormat::default()));
    }

    #[test]
    fn write_text_matches_render_text() {
        let mut generator = MazeGenerator::seeded(Width(9), Height(7), 21).unwrap();
        generator.generate().unwrap();

        let mut out = Vec::new();
        write_text(generator.grid(), &TextFormat::default(), &mut out).unwrap();
        let written = String::from_utf8(out).unwrap();

        assert_eq!(written, render_text(generator.grid(), &TextFormat::default()));
        assert_eq!(written.lines().count(), 7);
        assert!(written.lines().all(|line| line.chars().count() == 9 + 8));
    }

    #[test]
    fn save_and_read_back() {
        let mut generator = MazeGenerator::seeded(Width(11), Height(11), 3).unwrap();
        generator.generate().unwrap();

        let path = env::temp_dir().join(format!("mazes-export-{}.txt", process::id()));
        save_to_file(generator.grid(), &TextFormat::default(), &path).unwrap();
        let saved = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(saved, generator.grid().to_string());
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let grid = smallest_maze();
        let before = grid.snapshot();
        let path = env::temp_dir().join("mazes-no-such-directory").join("nested").join("maze.txt");

        let result = save_to_file(&grid, &TextFormat::default(), &path);
        match result {
            Err(ref e) => match *e.kind() {
                ErrorKind::Export(ref reported) => assert_eq!(reported, &path.display().to_string()),
                ref other => panic!("expected an export error, got {:?}", other),
            },
            Ok(()) => panic!("writing into a missing directory should fail"),
        }
        assert_eq!(grid.snapshot(), before);
    }
}
