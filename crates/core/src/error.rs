//! Error types for chess-pie-core

use thiserror::Error;

use crate::board::{PieceKind, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    #[error("no piece at {0}")]
    NoPieceAtSource(Square),

    #[error("{kind} cannot move from {from} to {to}")]
    IllegalShape {
        kind: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("path blocked at {at}")]
    PathBlocked { at: Square },

    #[error("destination {0} is occupied")]
    DestinationOccupied(Square),

    #[error("nothing to capture on {0}")]
    NothingToCapture(Square),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("unknown game: {0}")]
    UnknownGame(String),

    #[error("game limit of {0} reached")]
    TooManyGames(usize),
}

impl Error {
    /// Stable snake_case code used in API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidCoordinate(_) => "invalid_coordinate",
            Error::NoPieceAtSource(_) => "no_piece_at_source",
            Error::IllegalShape { .. } => "illegal_shape",
            Error::PathBlocked { .. } => "path_blocked",
            Error::DestinationOccupied(_) => "destination_occupied",
            Error::NothingToCapture(_) => "nothing_to_capture",
            Error::MalformedRequest(_) => "malformed_request",
            Error::UnknownGame(_) => "unknown_game",
            Error::TooManyGames(_) => "too_many_games",
        }
    }

    /// True for errors caused by unparseable input rather than by the rules.
    pub fn is_client_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidCoordinate(_) | Error::MalformedRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
