//! WebSocket connection handler
//!
//! The transport boundary: performs the WebSocket handshake, decodes JSON
//! frames into client events for the broker, and writes broker events back
//! out. The broker itself never sees a socket. Whatever way the connection
//! ends, exactly one `Disconnect` command is sent for it.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use crate::broker::BrokerCommand;
use crate::error::AppError;
use crate::message::{ClientEvent, ServerEvent};
use crate::types::{ConnId, RoomId};

/// Handle a new TCP connection
///
/// Performs the WebSocket handshake, assigns a connection id, and runs the
/// read/write tasks until the connection ends.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<BrokerCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    // WebSocket handshake
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let conn_id = ConnId::new();
    info!("Connection {} established from {}", conn_id, peer_addr);

    // Channel for broker -> connection events
    let (event_tx, mut event_rx) = mpsc::channel::<ServerEvent>(32);

    let cmd_tx_read = cmd_tx.clone();

    // Read task (WebSocket -> BrokerCommand)
    let read_task = tokio::spawn(async move {
        while let Some(msg_result) = ws_receiver.next().await {
            match msg_result {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => {
                            let cmd = client_event_to_command(conn_id, event, &event_tx);
                            if cmd_tx_read.send(cmd).await.is_err() {
                                debug!("Broker closed, ending read task for {}", conn_id);
                                break;
                            }
                        }
                        Err(e) => {
                            // Malformed frames are dropped, consistent with
                            // the broker's fail-silent policy
                            warn!("Invalid JSON from {}: {}", conn_id, e);
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("Connection {} sent close frame", conn_id);
                    break;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Pong is handled automatically by tungstenite
                }
                Ok(_) => {
                    // Binary or other message types - ignore
                }
                Err(e) => {
                    error!("WebSocket error for {}: {}", conn_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", conn_id);
    });

    // Write task (ServerEvent -> WebSocket)
    let write_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, ending write task");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize event: {}", e);
                    // Continue - don't break on serialization errors
                }
            }
        }
        debug!("Write task ended for connection");

        // Send close frame when done
        let _ = ws_sender.close().await;
    });

    // Wait for either task to complete
    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", conn_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", conn_id);
        }
    }

    // Exactly one disconnect per connection, sent from here and nowhere else
    let _ = cmd_tx.send(BrokerCommand::Disconnect { conn_id }).await;

    info!("Connection {} closed", conn_id);

    Ok(())
}

/// Convert a decoded client event into a broker command
///
/// Join carries a fresh clone of the event channel so the broker can wire
/// the new membership up for delivery.
fn client_event_to_command(
    conn_id: ConnId,
    event: ClientEvent,
    event_tx: &mpsc::Sender<ServerEvent>,
) -> BrokerCommand {
    match event {
        ClientEvent::JoinRoom {
            room_id,
            display_name,
        } => BrokerCommand::Join {
            conn_id,
            room_id: RoomId::new(room_id),
            display_name,
            sender: event_tx.clone(),
        },
        ClientEvent::SendMessage { room_id, text } => BrokerCommand::SendMessage {
            conn_id,
            room_id: RoomId::new(room_id),
            text,
        },
        ClientEvent::Typing {
            room_id,
            is_typing,
            text,
        } => BrokerCommand::Typing {
            conn_id,
            room_id: RoomId::new(room_id),
            is_typing,
            text,
        },
        ClientEvent::LeaveRoom { room_id } => BrokerCommand::Leave {
            conn_id,
            room_id: RoomId::new(room_id),
        },
    }
}
