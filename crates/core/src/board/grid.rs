//! 8x8 board grid and the move mutator

use std::fmt;

use super::{Color, Piece, PieceKind, Square};
use crate::error::{Error, Result};

/// Rank-major grid; `cells[row][col]`. The board is the only owner of live
/// pieces, so a captured piece leaves play when it is displaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    /// Standard starting layout, 16 pieces per side.
    pub fn standard() -> Self {
        let mut board = Self::empty();

        for color in [Color::White, Color::Black] {
            for col in 0..8u8 {
                let back = Square::new(color.back_row(), col);
                let pawn = Square::new(color.pawn_row(), col);
                if let Some(sq) = back {
                    board.put_home(PieceKind::BACK_RANK[col as usize], sq);
                }
                if let Some(sq) = pawn {
                    board.put_home(PieceKind::Pawn, sq);
                }
            }
        }

        board
    }

    fn put_home(&mut self, kind: PieceKind, square: Square) {
        if let Some(piece) = Piece::on_home_square(kind, square) {
            *self.cell_mut(square) = Some(piece);
        }
    }

    fn cell(&self, square: Square) -> &Option<Piece> {
        &self.cells[square.row() as usize][square.col() as usize]
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.cells[square.row() as usize][square.col() as usize]
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.cell(square).as_ref()
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.cell(square).is_some()
    }

    /// Put a new piece on `square`, returning whatever stood there.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> Option<Piece> {
        self.cell_mut(square).replace(Piece::new(kind, color, square))
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cell_mut(square).take()
    }

    /// Live pieces in rank-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flatten()
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|p| p.color() == color).count()
    }

    pub fn king_count(&self, color: Color) -> usize {
        self.pieces()
            .filter(|p| p.color() == color && p.kind() == PieceKind::King)
            .count()
    }

    /// Commit a move that has already been validated.
    ///
    /// The piece leaves `start`, its stored position becomes `end`, a pawn is
    /// marked as having moved, and the piece previously on `end` (if any) is
    /// returned and no longer on the board.
    pub fn apply_move(&mut self, start: Square, end: Square) -> Result<Option<Piece>> {
        let mut piece = self.remove(start).ok_or(Error::NoPieceAtSource(start))?;
        piece.relocate(end);
        Ok(self.cell_mut(end).replace(piece))
    }

    /// FEN piece-placement field, rank 8 first.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(72);

        for row in (0..8usize).rev() {
            let mut empty = 0;
            for cell in &self.cells[row] {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row > 0 {
                out.push('/');
            }
        }

        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8usize).rev() {
            write!(f, "{} ", row + 1)?;
            for cell in &self.cells[row] {
                let symbol = cell.as_ref().map(Piece::symbol).unwrap_or('.');
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   A B C D E F G H")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    fn positions_match_cells(board: &Board) -> bool {
        Square::all().all(|s| board.piece_at(s).map_or(true, |p| p.position() == s))
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.count(Color::White), 16);
        assert_eq!(board.count(Color::Black), 16);
        assert_eq!(board.king_count(Color::White), 1);
        assert_eq!(board.king_count(Color::Black), 1);
        assert_eq!(board.placement(), START_PLACEMENT);

        let queen = board.piece_at(sq("D1")).unwrap();
        assert_eq!(queen.kind(), PieceKind::Queen);
        assert_eq!(queen.color(), Color::White);
        assert_eq!(board.piece_at(sq("E8")).unwrap().kind(), PieceKind::King);
        assert!(positions_match_cells(&board));
    }

    #[test]
    fn test_apply_move_relocates_piece() {
        let mut board = Board::standard();
        let captured = board.apply_move(sq("E2"), sq("E4")).unwrap();

        assert!(captured.is_none());
        assert!(!board.is_occupied(sq("E2")));
        let pawn = board.piece_at(sq("E4")).unwrap();
        assert_eq!(pawn.position(), sq("E4"));
        assert!(pawn.moved_once());
        assert!(positions_match_cells(&board));
        assert_eq!(
            board.placement(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_apply_move_removes_captured_piece() {
        let mut board = Board::empty();
        board.place(PieceKind::Rook, Color::White, sq("A1"));
        board.place(PieceKind::Knight, Color::Black, sq("A5"));

        let captured = board.apply_move(sq("A1"), sq("A5")).unwrap().unwrap();
        assert_eq!(captured.kind(), PieceKind::Knight);
        assert_eq!(board.count(Color::Black), 0);
        assert_eq!(board.pieces().count(), 1);
        assert!(positions_match_cells(&board));
    }

    #[test]
    fn test_apply_move_from_empty_square() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply_move(sq("E4"), sq("E5")),
            Err(Error::NoPieceAtSource(sq("E4")))
        );
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_display_diagram() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[8], "   A B C D E F G H");
    }
}
