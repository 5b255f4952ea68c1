//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/rooms` の要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub members: Vec<String>,
}

/// `GET /api/history` の要素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub sender: String,
    pub message: String,
    /// RFC 3339 (UTC)
    pub sent_at: String,
}
