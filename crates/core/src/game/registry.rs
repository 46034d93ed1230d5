//! Games keyed by id, each behind its own lock

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::Game;
use crate::error::{Error, Result};

const MAX_ID_LEN: usize = 64;

/// Identifier of one game: 1-64 ASCII alphanumerics, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GameId(String);

impl GameId {
    pub const DEFAULT: &'static str = "default";

    pub fn default_id() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GameId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let valid = !s.is_empty()
            && s.len() <= MAX_ID_LEN
            && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::MalformedRequest(format!("invalid game id {:?}", s)))
        }
    }
}

impl TryFrom<String> for GameId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<GameId> for String {
    fn from(value: GameId) -> Self {
        value.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every game gets its own mutex; the map lock is only held to look games up.
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<Mutex<Game>>>>,
    max_games: usize,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_MAX_GAMES)
    }
}

impl GameRegistry {
    pub const DEFAULT_MAX_GAMES: usize = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding at most `max_games` games at once.
    pub fn with_limit(max_games: usize) -> Self {
        Self {
            games: RwLock::default(),
            max_games,
        }
    }

    pub fn max_games(&self) -> usize {
        self.max_games
    }

    /// Create the game, or reset it to the starting layout if it exists.
    /// A new id fails with `TooManyGames` once the limit is reached.
    pub fn start(&self, id: GameId) -> Result<()> {
        let existing = {
            let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
            match games.get(&id).cloned() {
                Some(handle) => handle,
                None => {
                    if games.len() >= self.max_games {
                        return Err(Error::TooManyGames(self.max_games));
                    }
                    games.insert(id, Arc::new(Mutex::new(Game::new())));
                    return Ok(());
                }
            }
        };

        *existing.lock().unwrap_or_else(PoisonError::into_inner) = Game::new();
        Ok(())
    }

    /// Insert under `id` only if it is free. Returns whether it was inserted.
    pub fn insert_new(&self, id: GameId, game: Game) -> Result<bool> {
        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        if games.contains_key(&id) {
            return Ok(false);
        }
        if games.len() >= self.max_games {
            return Err(Error::TooManyGames(self.max_games));
        }
        games.insert(id, Arc::new(Mutex::new(game)));
        Ok(true)
    }

    fn handle(&self, id: &GameId) -> Result<Arc<Mutex<Game>>> {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownGame(id.to_string()))
    }

    /// Run `f` with exclusive access to one game.
    pub fn with_game<R>(&self, id: &GameId, f: impl FnOnce(&mut Game) -> R) -> Result<R> {
        let handle = self.handle(id)?;
        let mut game = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut game))
    }

    pub fn remove(&self, id: &GameId) -> bool {
        self.games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn contains(&self, id: &GameId) -> bool {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MoveRequest;
    use std::thread;

    fn id(s: &str) -> GameId {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> MoveRequest {
        s.parse().unwrap()
    }

    #[test]
    fn test_game_id_validation() {
        assert_eq!(id("room-42_b").as_str(), "room-42_b");
        for bad in ["", "has space", "semi;colon", "slash/id"] {
            assert!(bad.parse::<GameId>().is_err(), "{bad:?}");
        }
        assert!("x".repeat(65).parse::<GameId>().is_err());
        assert!("x".repeat(64).parse::<GameId>().is_ok());
        assert_eq!(GameId::default_id().as_str(), "default");
    }

    #[test]
    fn test_unknown_game() {
        let registry = GameRegistry::new();
        let err = registry.with_game(&id("nope"), |_| ()).unwrap_err();
        assert_eq!(err, Error::UnknownGame("nope".to_string()));
    }

    #[test]
    fn test_games_are_isolated() {
        let registry = GameRegistry::new();
        registry.start(id("a")).unwrap();
        registry.start(id("b")).unwrap();

        registry
            .with_game(&id("a"), |g| g.play(&mv("E2-E4-false")))
            .unwrap()
            .unwrap();

        let a = registry.with_game(&id("a"), |g| g.board().placement()).unwrap();
        let b = registry.with_game(&id("b"), |g| g.board().placement()).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.ids(), vec![id("a"), id("b")]);
    }

    #[test]
    fn test_start_resets_existing_game() {
        let registry = GameRegistry::new();
        registry.start(id("g")).unwrap();
        registry
            .with_game(&id("g"), |g| g.play(&mv("G1-F3-false")))
            .unwrap()
            .unwrap();

        registry.start(id("g")).unwrap();
        let moves = registry.with_game(&id("g"), |g| g.moves_played()).unwrap();
        assert_eq!(moves, 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insert_new_and_remove() {
        let registry = GameRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.insert_new(id("x"), Game::new()).unwrap());
        assert!(!registry.insert_new(id("x"), Game::new()).unwrap());
        assert!(registry.contains(&id("x")));
        assert!(registry.remove(&id("x")));
        assert!(!registry.remove(&id("x")));
    }

    #[test]
    fn test_limit_rejects_new_ids() {
        let registry = GameRegistry::with_limit(3);
        for n in 0..3 {
            registry.start(id(&format!("g{n}"))).unwrap();
        }
        assert_eq!(registry.len(), 3);

        assert_eq!(registry.start(id("g3")), Err(Error::TooManyGames(3)));
        assert_eq!(
            registry.insert_new(id("g4"), Game::new()),
            Err(Error::TooManyGames(3))
        );
        assert_eq!(registry.len(), 3);

        // Existing ids can still be reset, and removal frees a slot.
        registry
            .with_game(&id("g0"), |g| g.play(&mv("E2-E4-false")))
            .unwrap()
            .unwrap();
        registry.start(id("g0")).unwrap();
        assert_eq!(registry.with_game(&id("g0"), |g| g.moves_played()).unwrap(), 0);

        assert!(registry.remove(&id("g1")));
        registry.start(id("g3")).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_reset_does_not_block_other_games() {
        let registry = Arc::new(GameRegistry::new());
        registry.start(id("busy")).unwrap();
        registry.start(id("idle")).unwrap();

        let (locked_tx, locked_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        let holder = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .with_game(&id("busy"), |_| {
                        locked_tx.send(()).unwrap();
                        release_rx.recv().unwrap();
                    })
                    .unwrap();
            })
        };
        locked_rx.recv().unwrap();

        // Waits on the busy game's lock, not on the map.
        let resetter = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.start(id("busy")).unwrap())
        };
        thread::sleep(std::time::Duration::from_millis(50));

        assert!(registry.games.try_read().is_ok());
        let idle_moves = registry.with_game(&id("idle"), |g| g.moves_played()).unwrap();
        assert_eq!(idle_moves, 0);
        assert!(registry.contains(&id("idle")));

        release_tx.send(()).unwrap();
        holder.join().unwrap();
        resetter.join().unwrap();
    }

    #[test]
    fn test_concurrent_moves_are_serialized() {
        let registry = Arc::new(GameRegistry::new());
        registry.start(id("shared")).unwrap();

        // Both threads race for the same pawn double step; exactly one wins.
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry
                        .with_game(&id("shared"), |g| g.play(&mv("E2-E4-false")).is_ok())
                        .unwrap()
                })
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);

        let moves = registry
            .with_game(&id("shared"), |g| g.moves_played())
            .unwrap();
        assert_eq!(moves, 1);
    }
}
