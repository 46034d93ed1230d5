use chess_pie_core::{Error, GameId, GameRegistry, Result};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Game used when a request carries no `game` parameter.
    pub default_game: GameId,
    /// Upper bound on games held in memory at once.
    pub max_games: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_ADDR.to_string(),
            default_game: GameId::default_id(),
            max_games: GameRegistry::DEFAULT_MAX_GAMES,
        }
    }
}

impl Config {
    /// Read `CHESS_PIE_ADDR`, `CHESS_PIE_DEFAULT_GAME` and `CHESS_PIE_MAX_GAMES`,
    /// falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("CHESS_PIE_ADDR").filter(|a| !a.trim().is_empty()) {
            cfg.bind_addr = addr.trim().to_string();
        }
        if let Some(id) = lookup("CHESS_PIE_DEFAULT_GAME") {
            cfg.default_game = id.trim().parse()?;
        }
        if let Some(max) = lookup("CHESS_PIE_MAX_GAMES") {
            cfg.max_games = match max.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(Error::MalformedRequest(format!(
                        "CHESS_PIE_MAX_GAMES must be a positive integer, got {max:?}"
                    )))
                }
            };
        }

        Ok(cfg)
    }
}
