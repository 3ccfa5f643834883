//! Text board format for toroidal Game of Life grids.
//!
//! ```text
//! 5,3        <- "{cols},{rows}"
//! .x...
//! ..x..
//! xxx..
//! ```
//!
//! [`parse`] and [`load`] build a [`Grid`](gol_core::Grid) from this format;
//! [`write_to`] and [`save`] produce it. Saving emits exactly
//! [`Grid::to_text`](gol_core::Grid::to_text), so any saved board loads
//! back to an equal grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod reader;
pub mod writer;

pub use error::BoardError;
pub use reader::{load, parse, read_from};
pub use writer::{save, write_to};
