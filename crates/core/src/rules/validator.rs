//! Move legality: shape rule, then blocking trace, then destination

use crate::board::{Board, PieceKind, Square};
use crate::error::{Error, Result};

use super::shape::{shape_allows, Delta};
use super::trace::trace;

/// Decide whether the piece on `start` may move to `end`.
///
/// `captured` asserts that the move takes an opposing piece on `end`. It
/// selects between a pawn's straight advance and its diagonal capture and is
/// otherwise informational. The board is never modified.
pub fn validate(board: &Board, start: Square, end: Square, captured: bool) -> Result<()> {
    let piece = board.piece_at(start).ok_or(Error::NoPieceAtSource(start))?;

    let delta = Delta::between(start, end);
    if !shape_allows(piece, delta, captured) {
        return Err(Error::IllegalShape {
            kind: piece.kind(),
            from: start,
            to: end,
        });
    }

    if !piece.kind().jumps() {
        // Every non-jumping shape is orthogonal or diagonal, so the trace exists.
        if let Some(at) = trace(start, end)
            .into_iter()
            .flatten()
            .find(|&sq| board.is_occupied(sq))
        {
            return Err(Error::PathBlocked { at });
        }
    }

    let target = board.piece_at(end);
    if target.is_some_and(|t| t.color() == piece.color()) {
        return Err(Error::DestinationOccupied(end));
    }

    if piece.kind() == PieceKind::Pawn {
        match (delta.dx(), target) {
            (0, Some(_)) => return Err(Error::DestinationOccupied(end)),
            (1, None) => return Err(Error::NothingToCapture(end)),
            _ => {}
        }
    }

    Ok(())
}

pub fn is_legal(board: &Board, start: Square, end: Square, captured: bool) -> bool {
    validate(board, start, end, captured).is_ok()
}
