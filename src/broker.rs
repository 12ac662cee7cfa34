//! Broker actor implementation
//!
//! The central actor owning all membership state: the connection registry
//! (membership pointers) and the room registry (rosters). Commands from
//! connection handlers arrive over an mpsc channel and are processed one
//! at a time, so every check-mutate-notify sequence runs as a single
//! atomic unit with no locks.
//!
//! The transition rules implemented here:
//! - re-joining the current room is a total no-op;
//! - joining a different room leaves the old one quietly (roster updated,
//!   room destroyed if emptied, no "left" broadcast);
//! - send/typing are valid only when the stated room matches the sender's
//!   membership pointer and roster entry, otherwise silently dropped;
//! - explicit leave and disconnect notify the remaining members;
//! - a second leave/disconnect for an unbound connection is a no-op.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::message::ServerEvent;
use crate::participant::Participant;
use crate::registry::{ConnectionRegistry, RoomRegistry};
use crate::router;
use crate::types::{now_millis, ConnId, RoomId};

/// Commands sent from connection handlers to the broker actor
#[derive(Debug)]
pub enum BrokerCommand {
    /// Join a room, creating it if absent
    Join {
        conn_id: ConnId,
        room_id: RoomId,
        display_name: String,
        /// Broker → connection event channel for the new membership
        sender: mpsc::Sender<ServerEvent>,
    },
    /// Chat message to the connection's current room
    SendMessage {
        conn_id: ConnId,
        room_id: RoomId,
        text: String,
    },
    /// Ephemeral typing signal, relayed without being stored
    Typing {
        conn_id: ConnId,
        room_id: RoomId,
        is_typing: bool,
        text: String,
    },
    /// Explicit leave request
    Leave { conn_id: ConnId, room_id: RoomId },
    /// Transport-level connection loss
    Disconnect { conn_id: ConnId },
}

/// The broker actor
///
/// Single source of truth for room existence and membership. Handlers
/// never touch this state directly; they send `BrokerCommand`s.
pub struct Broker {
    /// Membership pointers: connection → current room
    connections: ConnectionRegistry,
    /// Room rosters, existing iff non-empty
    rooms: RoomRegistry,
    /// Command receiver channel
    receiver: mpsc::Receiver<BrokerCommand>,
}

impl Broker {
    /// Create a new broker with the given command receiver
    pub fn new(receiver: mpsc::Receiver<BrokerCommand>) -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            rooms: RoomRegistry::new(),
            receiver,
        }
    }

    /// Run the broker event loop
    ///
    /// Continuously receives and processes commands until all senders are
    /// dropped.
    pub async fn run(mut self) {
        info!("Broker started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd).await;
        }

        info!("Broker shutting down");
    }

    /// Process a single command
    async fn handle_command(&mut self, cmd: BrokerCommand) {
        match cmd {
            BrokerCommand::Join {
                conn_id,
                room_id,
                display_name,
                sender,
            } => {
                self.handle_join(conn_id, room_id, display_name, sender)
                    .await;
            }
            BrokerCommand::SendMessage {
                conn_id,
                room_id,
                text,
            } => {
                self.handle_send_message(conn_id, room_id, text).await;
            }
            BrokerCommand::Typing {
                conn_id,
                room_id,
                is_typing,
                text,
            } => {
                self.handle_typing(conn_id, room_id, is_typing, text).await;
            }
            BrokerCommand::Leave { conn_id, room_id } => {
                self.handle_leave(conn_id, room_id).await;
            }
            BrokerCommand::Disconnect { conn_id } => {
                self.handle_disconnect(conn_id).await;
            }
        }
    }

    /// Handle a join request
    async fn handle_join(
        &mut self,
        conn_id: ConnId,
        room_id: RoomId,
        display_name: String,
        sender: mpsc::Sender<ServerEvent>,
    ) {
        // Duplicate-join suppression: already there, nothing to do
        let previous = match self.connections.room_of(conn_id) {
            Some(current) if *current == room_id => return,
            Some(current) => Some(current.clone()),
            None => None,
        };

        // Switching rooms leaves the old one quietly
        if let Some(previous) = previous {
            self.leave_room(conn_id, &previous, false).await;
        }

        let participant = Participant::new(conn_id, display_name.clone(), sender);
        self.rooms.add_member(&room_id, participant);
        self.connections.set_room(conn_id, room_id.clone());

        info!(
            "Connection {} ({}) joined room {}",
            conn_id, display_name, room_id
        );

        let event = ServerEvent::joined(&display_name);
        if let Some(room) = self.rooms.get(&room_id) {
            debug!("Room {} now has {} member(s)", room_id, room.member_count());
            router::to_room(room, &event).await;
        }
    }

    /// Handle a chat message
    async fn handle_send_message(&mut self, conn_id: ConnId, room_id: RoomId, text: String) {
        // Invalid-state events are dropped, not answered
        if !self.is_member(conn_id, &room_id) {
            debug!(
                "Dropped chat from {} for room {} (not a member)",
                conn_id, room_id
            );
            return;
        }

        let Some(room) = self.rooms.get(&room_id) else {
            return;
        };
        let Some(sender) = room.get(conn_id) else {
            return;
        };

        let event = ServerEvent::Chat {
            sender_id: conn_id.to_string(),
            sender_name: sender.display_name.clone(),
            text,
            timestamp: now_millis(),
        };

        // Everyone in the room receives the chat, sender included
        router::to_room(room, &event).await;
    }

    /// Handle a typing signal
    async fn handle_typing(
        &mut self,
        conn_id: ConnId,
        room_id: RoomId,
        is_typing: bool,
        text: String,
    ) {
        if !self.is_member(conn_id, &room_id) {
            debug!(
                "Dropped typing signal from {} for room {} (not a member)",
                conn_id, room_id
            );
            return;
        }

        let Some(room) = self.rooms.get(&room_id) else {
            return;
        };
        let Some(sender) = room.get(conn_id) else {
            return;
        };

        let event = ServerEvent::UserTyping {
            user_id: conn_id.to_string(),
            display_name: sender.display_name.clone(),
            is_typing,
            text,
        };

        // Relayed to everyone but the sender; nothing is stored
        router::to_room_except(room, conn_id, &event).await;
    }

    /// Handle an explicit leave request
    async fn handle_leave(&mut self, conn_id: ConnId, room_id: RoomId) {
        self.leave_room(conn_id, &room_id, true).await;
    }

    /// Handle transport-level connection loss
    ///
    /// Leaves the current room with notification, then unconditionally
    /// clears the connection's registry entry. A repeat disconnect finds
    /// no pointer and does nothing.
    async fn handle_disconnect(&mut self, conn_id: ConnId) {
        info!("Connection {} disconnected", conn_id);

        if let Some(room_id) = self.connections.room_of(conn_id).cloned() {
            self.leave_room(conn_id, &room_id, true).await;
        }

        self.connections.clear(conn_id);

        debug!("Total rooms: {}", self.rooms.room_count());
    }

    /// Remove a connection from a room and run the departure side effects
    ///
    /// No-op if the room does not exist or the connection was not in its
    /// roster. `notify` is false for the quiet leave half of a room
    /// switch. The "left" event is computed before the roster lookup, so
    /// when this removal destroyed the room the broadcast simply reaches
    /// zero recipients.
    async fn leave_room(&mut self, conn_id: ConnId, room_id: &RoomId, notify: bool) {
        let Some(participant) = self.rooms.remove_member(room_id, conn_id) else {
            return;
        };

        if !self.rooms.contains(room_id) {
            debug!("Room {} is now empty and has been removed", room_id);
        }

        if notify {
            let event = ServerEvent::left(&participant.display_name);
            if let Some(room) = self.rooms.get(room_id) {
                router::to_room(room, &event).await;
            }
        }

        if self.connections.room_of(conn_id) == Some(room_id) {
            self.connections.clear(conn_id);
        }

        info!(
            "Connection {} ({}) left room {}",
            conn_id, participant.display_name, room_id
        );
    }

    /// Check that the stated room matches both the membership pointer and
    /// the roster
    fn is_member(&self, conn_id: ConnId, room_id: &RoomId) -> bool {
        self.connections.room_of(conn_id) == Some(room_id)
            && self
                .rooms
                .get(room_id)
                .is_some_and(|room| room.contains(conn_id))
    }
}
