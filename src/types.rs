//! Basic type definitions for the broker
//!
//! Provides newtype wrappers for type safety:
//! - `ConnId`: UUID-based unique connection identifier
//! - `RoomId`: client-chosen room name

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4, assigned for the lifetime of one transport session.
/// Implements Hash and Eq for use as HashMap keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(pub Uuid);

impl ConnId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room identifier
///
/// Rooms are named by clients; a room exists only while it has members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current time in milliseconds since the Unix epoch
///
/// Used to stamp system and chat messages on dispatch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conn_id_unique() {
        let id1 = ConnId::new();
        let id2 = ConnId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_room_id_equality() {
        assert_eq!(RoomId::new("lobby"), RoomId::new("lobby"));
        assert_ne!(RoomId::new("lobby"), RoomId::new("den"));
    }

    #[test]
    fn test_now_millis_nonzero() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
        assert!(a > 0);
    }
}
