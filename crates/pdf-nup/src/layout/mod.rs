//! Layout calculation modules for N-up sheets
//!
//! This module handles all the geometric calculations for tiling pages:
//! - Grid layout (slot rectangles on one sheet)
//! - Sheet chunking (which page goes into which slot of which sheet)
//! - Content placement (aspect-preserving fit inside a slot)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
