//! Serializable view of a board

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, PieceKind, Square};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub moved_once: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// FEN piece placement.
    pub placement: String,
    pub moves_played: u32,
    pub pieces: Vec<PieceView>,
}

impl BoardSnapshot {
    pub fn of(board: &Board, moves_played: u32) -> Self {
        let pieces = board
            .pieces()
            .map(|p| PieceView {
                kind: p.kind(),
                color: p.color(),
                square: p.position(),
                moved_once: p.moved_once(),
            })
            .collect();

        Self {
            placement: board.placement(),
            moves_played,
            pieces,
        }
    }
}
