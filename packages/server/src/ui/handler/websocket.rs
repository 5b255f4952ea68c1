//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Identity, InboundEvent, ValueObjectError},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::ConnectError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub username: Option<String>,
}

/// Reasons an inbound frame is dropped
#[derive(Debug, Error)]
enum FrameError {
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid event: {0}")]
    Invalid(#[from] ValueObjectError),
}

/// テキストフレームをドメインのイベントに変換
fn decode_frame(text: &str) -> Result<InboundEvent, FrameError> {
    let event: ClientEvent = serde_json::from_str(text)?;
    Ok(InboundEvent::try_from(event)?)
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> Identity (Domain Model)
    let identity = match Identity::try_from(query.username.unwrap_or_default()) {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this client to receive events.
    // The queue is unbounded: a client that stops reading keeps buffering
    // in memory until its socket errors or closes. Known scaling limit.
    let (tx, rx) = mpsc::unbounded_channel();

    // Identity の claim はアップグレード前に行い、重複なら 409 で拒否する
    let connection = match state.dispatcher.connect(identity.clone(), tx).await {
        Ok(connection) => connection,
        Err(ConnectError::DuplicateIdentity(name)) => {
            tracing::warn!("'{}' is already connected. Rejecting connection.", name);
            return Err(StatusCode::CONFLICT);
        }
    };

    let state_on_failure = state.clone();
    Ok(ws
        .on_failed_upgrade(move |e| {
            tracing::warn!("WebSocket upgrade failed for {}: {}", connection, e);
            tokio::spawn(async move {
                state_on_failure.dispatcher.disconnect(connection).await;
            });
        })
        .on_upgrade(move |socket| handle_socket(socket, state, identity, connection, rx)))
}

/// Spawns a task that forwards encoded events from the rx channel to the WebSocket sink.
///
/// The task ends when the channel is closed (the connection was unregistered)
/// or the socket can no longer be written to.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    identity: Identity,
    connection: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let state_for_recv = state.clone();
    let identity_for_recv = identity.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error from '{}': {}", identity_for_recv, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match decode_frame(text.as_str()) {
                    Ok(event) => {
                        tracing::debug!("'{}' sent {:?}", identity_for_recv, event);
                        state_for_recv.dispatcher.handle(connection, event).await;
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring frame from '{}': {}", identity_for_recv, e);
                    }
                },
                Message::Close(_) => {
                    tracing::info!("'{}' requested close", identity_for_recv);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push events to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state.dispatcher.disconnect(connection).await.is_none() {
        tracing::debug!("'{}' ({}) was already released", identity, connection);
    }
}
