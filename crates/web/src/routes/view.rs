use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use chess_pie_core::{Board, Square};

use super::{resolve_game, ApiError, GameQuery};
use crate::AppState;

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub game: String,
    pub placement: String,
    pub moves_played: u32,
    pub files: Vec<char>,
    pub rows: Vec<RowView>,
}

pub struct RowView {
    pub rank: u8,
    pub cells: Vec<CellView>,
}

pub struct CellView {
    pub label: String,
    pub glyph: String,
    pub shade: &'static str,
}

fn rows_for(board: &Board) -> Vec<RowView> {
    (0..8u8)
        .rev()
        .map(|row| RowView {
            rank: row + 1,
            cells: (0..8u8)
                .filter_map(|col| Square::new(row, col))
                .map(|sq| CellView {
                    label: sq.to_string(),
                    glyph: board
                        .piece_at(sq)
                        .map(|p| p.glyph().to_string())
                        .unwrap_or_default(),
                    shade: if (sq.row() + sq.col()) % 2 == 0 { "dark" } else { "light" },
                })
                .collect(),
        })
        .collect()
}

pub async fn board_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameQuery>,
) -> Response {
    let id = match resolve_game(&state, params.game.as_deref()) {
        Ok(id) => id,
        Err(e) => return ApiError(e).into_response(),
    };

    let template = match state.games.with_game(&id, |game| BoardTemplate {
        title: "Chess Pie".to_string(),
        game: id.to_string(),
        placement: game.board().placement(),
        moves_played: game.moves_played(),
        files: "ABCDEFGH".chars().collect(),
        rows: rows_for(game.board()),
    }) {
        Ok(template) => template,
        Err(e) => return ApiError(e).into_response(),
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("failed to render board view: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
