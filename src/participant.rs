//! Participant struct definition
//!
//! A participant exists only while its connection is a member of a room:
//! created on a successful join, destroyed on leave or disconnect.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::message::ServerEvent;
use crate::types::ConnId;

/// Room member
///
/// Pairs a connection with the display name it joined under, plus the
/// channel used to deliver outbound events to that connection. The display
/// name is immutable for the duration of the membership.
#[derive(Debug, Clone)]
pub struct Participant {
    /// The owning connection
    pub id: ConnId,
    /// Name announced to the room
    pub display_name: String,
    /// Broker → connection event channel
    pub sender: mpsc::Sender<ServerEvent>,
}

impl Participant {
    pub fn new(id: ConnId, display_name: String, sender: mpsc::Sender<ServerEvent>) -> Self {
        Self {
            id,
            display_name,
            sender,
        }
    }

    /// Deliver an event to this participant's connection
    ///
    /// Returns an error if the channel is closed (connection gone).
    pub async fn send(&self, event: ServerEvent) -> Result<(), SendError> {
        self.sender
            .send(event)
            .await
            .map_err(|_| SendError::ChannelClosed)
    }
}
