use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use chess_pie_core::{BoardSnapshot, Error, Game, GameId, MoveOutcome, MoveRequest, PieceKind};

use crate::AppState;

pub mod view;

const GENERATED_ID_LEN: usize = 12;

// ============================================================================
// QUERY PARAMS
// ============================================================================

#[derive(Deserialize)]
pub struct GameQuery {
    pub game: Option<String>,
}

#[derive(Deserialize)]
pub struct MoveQuery {
    #[serde(rename = "move")]
    pub mv: Option<String>,
    pub game: Option<String>,
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
}

impl MoveResponse {
    fn accepted(outcome: &MoveOutcome) -> Self {
        Self {
            legal: true,
            error: None,
            message: None,
            captured: outcome.captured,
        }
    }

    fn rejected(err: &Error) -> Self {
        Self {
            legal: false,
            error: Some(err.code()),
            message: Some(err.to_string()),
            captured: None,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Serialize)]
pub struct CreatedGame {
    pub id: GameId,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_games: usize,
    pub ts: i64,
}

/// Core errors mapped onto HTTP: bad input is 400, a missing game 404, a full
/// registry 503, and rule violations are still a successful answer to "is
/// this legal".
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::UnknownGame(_) => StatusCode::NOT_FOUND,
        Error::TooManyGames(_) => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_client_input() => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match status_for(&self.0) {
            StatusCode::OK => StatusCode::UNPROCESSABLE_ENTITY,
            other => other,
        };
        let body = ErrorBody {
            error: self.0.code(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

fn resolve_game(state: &AppState, game: Option<&str>) -> Result<GameId, Error> {
    match game {
        Some(id) => id.parse(),
        None => Ok(state.default_game.clone()),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

pub async fn start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameQuery>,
) -> Result<&'static str, ApiError> {
    let id = resolve_game(&state, params.game.as_deref())?;
    state.games.start(id.clone())?;
    tracing::info!(game = %id, "game started");
    Ok("game started")
}

pub async fn make_move(
    State(state): State<Arc<AppState>>,
    query: Result<Query<MoveQuery>, QueryRejection>,
) -> (StatusCode, Json<MoveResponse>) {
    let result = query
        .map_err(|rejection| Error::MalformedRequest(rejection.body_text()))
        .and_then(|Query(params)| play(&state, &params));

    match result {
        Ok(outcome) => (StatusCode::OK, Json(MoveResponse::accepted(&outcome))),
        Err(err) => {
            tracing::debug!(error = %err, "move rejected");
            (status_for(&err), Json(MoveResponse::rejected(&err)))
        }
    }
}

fn play(state: &AppState, params: &MoveQuery) -> Result<MoveOutcome, Error> {
    let id = resolve_game(state, params.game.as_deref())?;
    let request: MoveRequest = params
        .mv
        .as_deref()
        .ok_or_else(|| Error::MalformedRequest("missing move parameter".to_string()))?
        .parse()?;

    let outcome = state.games.with_game(&id, |game| game.play(&request))??;
    tracing::info!(game = %id, %request, "move accepted");
    Ok(outcome)
}

pub async fn board(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameQuery>,
) -> Result<Json<BoardSnapshot>, ApiError> {
    let id = resolve_game(&state, params.game.as_deref())?;
    let snapshot = state.games.with_game(&id, |game| game.snapshot())?;
    Ok(Json(snapshot))
}

pub async fn create_game(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let id = loop {
        let candidate: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_ID_LEN)
            .map(char::from)
            .collect();
        let id: GameId = candidate.parse()?;
        if state.games.insert_new(id.clone(), Game::new())? {
            break id;
        }
    };

    tracing::info!(game = %id, "game created");
    Ok((StatusCode::CREATED, Json(CreatedGame { id })))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: GameId = id.parse()?;
    if state.games.remove(&id) {
        tracing::info!(game = %id, "game removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::UnknownGame(id.to_string()).into())
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        active_games: state.games.len(),
        ts: chrono::Utc::now().timestamp_millis(),
    })
}
