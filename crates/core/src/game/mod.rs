//! Games and their registry

mod registry;
mod session;
mod snapshot;

pub use registry::{GameId, GameRegistry};
pub use session::{Game, MoveOutcome};
pub use snapshot::{BoardSnapshot, PieceView};
