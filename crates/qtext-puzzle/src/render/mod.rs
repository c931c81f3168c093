//! Rendering of the Pauli grid.
//!
//! The grid is drawn into a [`Scene`], a flat list of circles, rotated
//! rectangles and text in grid coordinates, which serialises to SVG.

mod draw;
mod scene;
mod style;

pub use draw::{BoxFilter, GridPainter, View};
pub use scene::{Scene, Shape, VAlign};
pub use style::{RenderConfig, Rgb};
