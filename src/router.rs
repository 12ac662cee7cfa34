//! Broadcast fan-out
//!
//! Computes the delivery set for an event from one roster snapshot and
//! dispatches fire-and-forget. A closed channel means the recipient's
//! connection is already gone; that delivery is dropped, never retried.

use tracing::debug;

use crate::message::ServerEvent;
use crate::room::Room;
use crate::types::ConnId;

/// Deliver an event to every current member of the room
///
/// Used for join/leave notifications and chat: the sender, if still a
/// member, receives its own event.
pub async fn to_room(room: &Room, event: &ServerEvent) {
    for member in room.members() {
        if member.send(event.clone()).await.is_err() {
            debug!(
                "Dropped event for {} in room {} (channel closed)",
                member.id, room.id
            );
        }
    }
}

/// Deliver an event to every member of the room except the sender
///
/// Used for typing relays.
pub async fn to_room_except(room: &Room, sender_id: ConnId, event: &ServerEvent) {
    for member in room.members() {
        if member.id == sender_id {
            continue;
        }
        if member.send(event.clone()).await.is_err() {
            debug!(
                "Dropped event for {} in room {} (channel closed)",
                member.id, room.id
            );
        }
    }
}
