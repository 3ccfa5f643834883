//! Core types for the toroidal Game of Life workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! packed cell encoding, the wrap-around [`Grid`] with its toggle primitive,
//! the row-window [`RowBand`] used to hand disjoint regions to workers, and
//! the read-only [`Snapshot`] every generation classifies against.
//!
//! # Cell layout
//!
//! ```text
//! bit:   7 6 5 | 4 3 2 1 | 0
//!        0 0 0 | n n n n | a      a = alive, nnnn = live neighbours (0..=8)
//! ```
//!
//! The byte therefore ranges over `0..=17`, and the next state of a cell is a
//! pure function of that byte (see [`cell::transition`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod snapshot;
pub mod topology;

pub use cell::Transition;
pub use error::GridError;
pub use grid::{Grid, RowBand};
pub use snapshot::Snapshot;
pub use topology::Torus;
