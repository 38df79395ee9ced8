//! WebSocket upgrade handler and session loop.
//!
//! Each connection gets its own [`CatalogSession`]. The loop waits on two
//! things: the next client frame and the session's debounce timer. Every
//! reply is written back on the same socket, so updates for one page are
//! never reordered.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::SinkExt;
use futures::stream::{SplitSink, StreamExt};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::CatalogSession;
use crate::state::AppState;

/// WebSocket upgrade handler for `GET /ws`.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// What woke the session loop.
enum Turn {
    Frame(Option<Result<Message, axum::Error>>),
    Debounced,
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let mut session = CatalogSession::start(state.catalog(), state.config().search_debounce);
    let session_id = session.id();
    let (mut ws_write, mut ws_read) = socket.split();

    if send(&mut ws_write, &session.snapshot()).await.is_err() {
        return;
    }

    loop {
        let turn = tokio::select! {
            frame = ws_read.next() => Turn::Frame(frame),
            () = session.debounce_elapsed(), if session.controller().has_deferred() => {
                Turn::Debounced
            }
        };

        let reply = match turn {
            Turn::Debounced => Some(session.debounced_pass()),
            Turn::Frame(Some(Ok(Message::Text(text)))) => {
                match serde_json::from_str::<ClientMessage>(text.as_str()) {
                    Ok(message) => session.handle(message),
                    Err(e) => Some(ServerMessage::Error {
                        message: format!("Invalid message: {e}"),
                    }),
                }
            }
            Turn::Frame(Some(Ok(Message::Close(_)))) => {
                tracing::debug!(session_id = %session_id, "Client sent close frame");
                break;
            }
            Turn::Frame(Some(Ok(_))) => {
                // Ignore binary frames; axum answers pings
                None
            }
            Turn::Frame(Some(Err(e))) => {
                tracing::debug!(session_id = %session_id, error = %e, "WebSocket read error");
                break;
            }
            Turn::Frame(None) => break,
        };

        if let Some(reply) = reply
            && send(&mut ws_write, &reply).await.is_err()
        {
            tracing::debug!(session_id = %session_id, "WebSocket write failed, closing");
            break;
        }
    }

    tracing::debug!(session_id = %session_id, "Session closed");
}

async fn send(
    ws_write: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(json) => ws_write.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize ServerMessage");
            Ok(())
        }
    }
}
