//! Chess Pie Core Library
//!
//! Move legality for a plain chess board: shape rules per piece, a blocking
//! trace for sliding pieces, and the mutation that commits accepted moves.
//! Check, castling, en passant, promotion and turn order are not modelled.

pub mod board;
pub mod error;
pub mod game;
pub mod parser;
pub mod rules;

pub use board::{Board, Color, Piece, PieceKind, Square};
pub use error::{Error, Result};
pub use game::{BoardSnapshot, Game, GameId, GameRegistry, MoveOutcome};
pub use parser::MoveRequest;

/// Parse a `START-END-CAPTURED` string and validate it against `board`.
pub fn check_move(board: &Board, request: &str) -> Result<()> {
    let request: MoveRequest = request.parse()?;
    rules::validate(board, request.start, request.end, request.captured)
}
