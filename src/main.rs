use docopt::Docopt;
use log::info;
use mazes::{
    exporters::{self, TextFormat},
    generators::MazeGenerator,
    renderers::{self, TextRenderer},
    units::{Height, Width},
};
use serde_derive::Deserialize;
use std::{io, time::Duration};

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w>] [--height=<h>] [--seed=<s>] [--text-out=<path>] [--wall=<c>] [--passage=<c>] [--delimiter=<d>]
    mazes_driver animate [--width=<w>] [--height=<h>] [--seed=<s>] [--colour] [--frame-millis=<ms>]

Options:
    -h --help             Show this screen.
    --width=<w>           Maze width in cells, odd and at least 3 [default: 11].
    --height=<h>          Maze height in cells, odd and at least 3 [default: 11].
    --seed=<s>            Seed the random source to get the same maze every run.
    --text-out=<path>     Write the maze as text to this file instead of the console.
    --wall=<c>            Glyph for wall cells [default: #].
    --passage=<c>         Glyph for passage cells [default: .].
    --delimiter=<d>       Text between glyphs on a row, a single space if not given.
    --colour              Animate with terminal background colours rather than glyphs.
    --frame-millis=<ms>   Pause between animation frames [default: 30].
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_animate: bool,
    flag_width: usize,
    flag_height: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_wall: String,
    flag_passage: String,
    flag_delimiter: Option<String>,
    flag_colour: bool,
    flag_frame_millis: u64,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
        }

        errors {
            BadGlyph(option: &'static str) {
                description("glyph options must be a single character")
                display("--{} must be a single character", option)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let (width, height) = (Width(args.flag_width), Height(args.flag_height));

    let mut generator = match args.flag_seed {
        Some(seed) => MazeGenerator::seeded(width, height, seed)?,
        None => MazeGenerator::new(width, height)?,
    };

    if args.cmd_animate {
        let delay = Some(Duration::from_millis(args.flag_frame_millis));
        let stdout = io::stdout();
        let mut renderer = TextRenderer::new(stdout.lock(), width, height)
            .ansi(args.flag_colour)
            .redraw_in_place(true)
            .frame_delay(delay);

        renderers::replay(&mut generator, &mut renderer)?;
        return Ok(());
    }

    generator.generate()?;

    let format = TextFormat {
        wall_glyph: single_glyph(&args.flag_wall, "wall")?,
        passage_glyph: single_glyph(&args.flag_passage, "passage")?,
        delimiter: args.flag_delimiter.clone().unwrap_or_else(|| String::from(" ")),
    };

    if args.flag_text_out.is_empty() {
        exporters::print(generator.grid(), &format)?;
    } else {
        exporters::save_to_file(generator.grid(), &format, &args.flag_text_out)?;
        info!("Wrote {}x{} maze to {}", width.0, height.0, args.flag_text_out);
    }

    Ok(())
}

fn single_glyph(value: &str, option: &'static str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => Ok(glyph),
        _ => Err(ErrorKind::BadGlyph(option).into()),
    }
}
