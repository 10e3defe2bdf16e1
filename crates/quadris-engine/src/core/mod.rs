//! Static game data and the value types the rules operate on.
//!
//! - [`Point`] / [`Center`] - integer board coordinates and rotation pivots
//! - [`Shape`] / [`Color`] - the seven tetriminos and their lookup tables
//! - [`Piece`] / [`Rotation`] - a shape placed on the board
//! - [`Board`] - locked cells, collision checks and row clearing
//! - [`RenderBoard`] - what a front end draws

pub use self::{board::*, color::*, geometry::*, piece::*, render_board::*, shape::*};

pub(crate) mod board;
pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod piece;
pub(crate) mod render_board;
pub(crate) mod shape;
