//! Room struct definition
//!
//! A room is a roster of participants keyed by connection id. Rooms are
//! ephemeral: the registry creates one on first join and drops it the
//! moment its roster empties, so an empty room is never observable.

use std::collections::HashMap;

use crate::participant::Participant;
use crate::types::{ConnId, RoomId};

/// Named room with its current roster
#[derive(Debug)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Current members, keyed by connection
    members: HashMap<ConnId, Participant>,
}

impl Room {
    /// Create an empty room
    ///
    /// Only the registry calls this, immediately before inserting the
    /// first member.
    pub fn new(id: RoomId) -> Self {
        Self {
            id,
            members: HashMap::new(),
        }
    }

    /// Add or replace a member
    pub fn insert(&mut self, participant: Participant) {
        self.members.insert(participant.id, participant);
    }

    /// Remove a member, returning it if it was present
    pub fn remove(&mut self, conn_id: ConnId) -> Option<Participant> {
        self.members.remove(&conn_id)
    }

    /// Check whether a connection is a member
    pub fn contains(&self, conn_id: ConnId) -> bool {
        self.members.contains_key(&conn_id)
    }

    /// Look up a member by connection id
    pub fn get(&self, conn_id: ConnId) -> Option<&Participant> {
        self.members.get(&conn_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Iterate over the current roster (order irrelevant)
    pub fn members(&self) -> impl Iterator<Item = &Participant> {
        self.members.values()
    }
}
