pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::protocol::{ClientMessage, ServerMessage};
use crate::Gateway;

/// WebSocket upgrade handler for platform bridges
pub async fn ws_handler(ws: WebSocketUpgrade, State(gateway): State<Gateway>) -> impl IntoResponse {
    tracing::info!("Bridge connection request");
    ws.on_upgrade(move |socket| handle_socket(socket, gateway))
}

/// Handle one bridge connection
async fn handle_socket(socket: WebSocket, gateway: Gateway) {
    let (mut sender, mut receiver) = socket.split();
    let mut announcements = gateway.bridge.subscribe();

    tracing::info!("Bridge connected");

    loop {
        tokio::select! {
            // Announcements go to every connected bridge
            announcement = announcements.recv() => {
                match announcement {
                    Ok(msg) => {
                        if let Ok(json) = serde_json::to_string(&msg) {
                            if sender.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Bridge lagging, dropped {} announcements", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }

            // Events from the bridge
            ws_msg = receiver.next() => {
                match ws_msg {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received event: {}", text);

                        let response = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(event) => handlers::handle_message(event, &gateway.state).await,
                            Err(e) => {
                                tracing::error!("Failed to parse bridge event: {}", e);
                                Some(ServerMessage::Error {
                                    code: "PARSE_ERROR".to_string(),
                                    msg: format!("Invalid message format: {}", e),
                                })
                            }
                        };

                        if let Some(response) = response {
                            if let Ok(json) = serde_json::to_string(&response) {
                                if sender.send(Message::Text(json.into())).await.is_err() {
                                    tracing::error!("Failed to send response");
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Bridge closed connection");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    tracing::info!("Bridge disconnected");
}
