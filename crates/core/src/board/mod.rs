//! Board, pieces and squares

mod grid;
mod piece;
mod square;

pub use grid::Board;
pub use piece::{Color, Piece, PieceKind};
pub use square::Square;
