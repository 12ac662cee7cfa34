//! Connection and room registries
//!
//! Two maps the broker owns exclusively:
//! - `ConnectionRegistry` answers "what room is this connection bound to"
//!   in O(1) and detects duplicate join attempts.
//! - `RoomRegistry` owns room existence. A room id is present iff its
//!   roster is non-empty: creation happens on first join, deletion happens
//!   atomically with the removal that empties the roster.
//!
//! Neither registry validates transitions; the broker enforces the
//! membership invariants before touching them.

use std::collections::HashMap;

use crate::participant::Participant;
use crate::room::Room;
use crate::types::{ConnId, RoomId};

/// Per-connection membership pointer: conn id → current room id
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    current: HashMap<ConnId, RoomId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a connection to a room, replacing any previous binding
    pub fn set_room(&mut self, conn_id: ConnId, room_id: RoomId) {
        self.current.insert(conn_id, room_id);
    }

    /// Room the connection is currently bound to, if any
    pub fn room_of(&self, conn_id: ConnId) -> Option<&RoomId> {
        self.current.get(&conn_id)
    }

    /// Drop the connection's binding, returning the room it pointed at
    pub fn clear(&mut self, conn_id: ConnId) -> Option<RoomId> {
        self.current.remove(&conn_id)
    }
}

/// Room id → roster, with lifecycle enforced internally
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant to a room, creating the room if absent
    pub fn add_member(&mut self, room_id: &RoomId, participant: Participant) {
        self.rooms
            .entry(room_id.clone())
            .or_insert_with(|| Room::new(room_id.clone()))
            .insert(participant);
    }

    /// Remove a member from a room
    ///
    /// If the removal empties the roster the room entry is deleted in the
    /// same step, so no caller can observe an empty room. Returns the
    /// removed participant, or None if the room or member was absent.
    pub fn remove_member(&mut self, room_id: &RoomId, conn_id: ConnId) -> Option<Participant> {
        let room = self.rooms.get_mut(room_id)?;
        let removed = room.remove(conn_id);
        if room.is_empty() {
            self.rooms.remove(room_id);
        }
        removed
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn contains(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
