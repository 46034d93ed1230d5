//! A single game: one board plus the accepted-move counter

use serde::Serialize;

use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::error::{Error, Result};
use crate::parser::MoveRequest;
use crate::rules;

use super::snapshot::BoardSnapshot;

#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    moves_played: u32,
}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    pub kind: PieceKind,
    pub color: Color,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
}

impl Game {
    /// Fresh game in the standard starting layout.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            moves_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Validate without touching the board.
    pub fn check(&self, request: &MoveRequest) -> Result<()> {
        rules::validate(&self.board, request.start, request.end, request.captured)
    }

    /// Validate and, if legal, commit the move.
    pub fn play(&mut self, request: &MoveRequest) -> Result<MoveOutcome> {
        self.check(request)?;

        let (kind, color) = self
            .board
            .piece_at(request.start)
            .map(|p| (p.kind(), p.color()))
            .ok_or(Error::NoPieceAtSource(request.start))?;

        let captured = self.board.apply_move(request.start, request.end)?;
        self.moves_played += 1;

        let outcome = MoveOutcome {
            kind,
            color,
            from: request.start,
            to: request.end,
            captured: captured.as_ref().map(Piece::kind),
        };

        tracing::debug!(
            "{} {} {}-{}{}",
            color,
            kind,
            request.start,
            request.end,
            captured
                .map(|p| format!(" takes {}", p.kind()))
                .unwrap_or_default()
        );

        Ok(outcome)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::of(&self.board, self.moves_played)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(s: &str) -> MoveRequest {
        s.parse().unwrap()
    }

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    #[test]
    fn test_pawn_double_step_only_once() {
        let mut game = Game::new();
        game.play(&mv("E2-E4-false")).unwrap();

        let pawn = game.board().piece_at(sq("E4")).unwrap();
        assert!(pawn.moved_once());
        assert_eq!(pawn.position(), sq("E4"));

        let err = game.play(&mv("E4-E6-false")).unwrap_err();
        assert_eq!(err.code(), "illegal_shape");
        assert!(game.play(&mv("E4-E5-false")).is_ok());
        assert_eq!(game.moves_played(), 2);
    }

    #[test]
    fn test_rejected_move_leaves_board_untouched() {
        let mut game = Game::new();
        let before = game.board().clone();

        assert_eq!(
            game.play(&mv("A1-A8-false")),
            Err(Error::PathBlocked { at: sq("A2") })
        );
        assert_eq!(
            game.play(&mv("D4-D5-false")),
            Err(Error::NoPieceAtSource(sq("D4")))
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.moves_played(), 0);
    }

    #[test]
    fn test_capture_removes_piece_from_play() {
        let mut game = Game::new();
        for m in ["E2-E4-false", "D7-D5-false"] {
            game.play(&mv(m)).unwrap();
        }

        let outcome = game.play(&mv("E4-D5-true")).unwrap();
        assert_eq!(outcome.kind, PieceKind::Pawn);
        assert_eq!(outcome.color, Color::White);
        assert_eq!(outcome.captured, Some(PieceKind::Pawn));
        assert_eq!(game.board().count(Color::Black), 15);
        assert_eq!(game.board().count(Color::White), 16);
        assert!(game
            .board()
            .pieces()
            .all(|p| game.board().piece_at(p.position()) == Some(p)));
    }

    #[test]
    fn test_check_does_not_mutate() {
        let game = Game::new();
        assert!(game.check(&mv("G1-F3-false")).is_ok());
        assert!(game.board().is_occupied(sq("G1")));
        assert!(!game.board().is_occupied(sq("F3")));
    }

    #[test]
    fn test_sliding_after_opening() {
        let mut game = Game::new();
        for m in ["E2-E4-false", "E7-E5-false", "F1-C4-false", "B8-C6-false", "D1-H5-false"] {
            game.play(&mv(m)).unwrap_or_else(|e| panic!("{m}: {e}"));
        }
        let outcome = game.play(&mv("H5-F7-true")).unwrap();
        assert_eq!(outcome.kind, PieceKind::Queen);
        assert_eq!(outcome.captured, Some(PieceKind::Pawn));
        assert_eq!(game.moves_played(), 6);
    }
}
