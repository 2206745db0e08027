//! **mazes** generates perfect mazes with the recursive backtracker (randomized depth first
//! search), and exports or animates them.

// error_chain! expands deeply
#![recursion_limit = "1024"]

pub mod cells;
pub mod errors;
pub mod exporters;
pub mod generators;
pub mod graphs;
pub mod grid;
pub mod renderers;
pub mod units;
mod utils;
