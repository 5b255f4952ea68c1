//! Hiroba message relay.
//!
//! Global chat, named rooms and private messages between connected clients,
//! with live presence, typing indicators and a short global history,
//! served over WebSocket.

pub mod bootstrap;
pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
