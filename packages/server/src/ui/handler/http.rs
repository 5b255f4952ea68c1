//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::Identity,
    infrastructure::dto::http::{HistoryEntryDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// 接続中のユーザー一覧（接続順）
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let users = state.get_online_users_usecase.execute().await;
    Json(users.into_iter().map(Identity::into_string).collect())
}

/// ルームとメンバーの一覧（ルーム名順）
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// グローバルメッセージの履歴（古い順）
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryEntryDto>> {
    let history = state.get_history_usecase.execute().await;
    Json(history.iter().map(HistoryEntryDto::from).collect())
}
