//! Per-piece movement shapes, ignoring obstructions

use crate::board::{Color, Piece, PieceKind, Square};

/// Signed displacement from start to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub d_row: i8,
    pub d_col: i8,
}

impl Delta {
    pub fn between(start: Square, end: Square) -> Self {
        Self {
            d_row: end.row() as i8 - start.row() as i8,
            d_col: end.col() as i8 - start.col() as i8,
        }
    }

    pub fn dx(&self) -> u8 {
        self.d_col.unsigned_abs()
    }

    pub fn dy(&self) -> u8 {
        self.d_row.unsigned_abs()
    }

    pub fn is_null(&self) -> bool {
        self.d_row == 0 && self.d_col == 0
    }

    /// Pure horizontal or vertical, never both zero.
    pub fn is_orthogonal(&self) -> bool {
        (self.d_row == 0) ^ (self.d_col == 0)
    }

    pub fn is_diagonal(&self) -> bool {
        self.dx() == self.dy() && self.dx() > 0
    }
}

/// Whether `piece` may travel by `delta`. `captured` only matters for pawns.
pub fn shape_allows(piece: &Piece, delta: Delta, captured: bool) -> bool {
    let (dx, dy) = (delta.dx(), delta.dy());

    match piece.kind() {
        PieceKind::Rook => delta.is_orthogonal(),
        PieceKind::Bishop => delta.is_diagonal(),
        PieceKind::Queen => delta.is_orthogonal() || delta.is_diagonal(),
        PieceKind::King => dx <= 1 && dy <= 1 && dx + dy > 0,
        PieceKind::Knight => (dx == 1 && dy == 2) || (dx == 2 && dy == 1),
        PieceKind::Pawn => pawn_allows(piece.color(), piece.moved_once(), delta, captured),
    }
}

fn pawn_allows(color: Color, moved_once: bool, delta: Delta, captured: bool) -> bool {
    if delta.d_row.signum() != color.forward() {
        return false;
    }

    match (delta.dx(), delta.dy()) {
        (0, 1) => !captured,
        (0, 2) => !captured && !moved_once,
        (1, 1) => captured,
        _ => false,
    }
}
