//! Room-Based Presence & Message-Relay Broker
//!
//! A WebSocket broker where clients join named rooms, exchange short text
//! messages and ephemeral typing signals, and drop off the roster on leave
//! or connection loss.
//!
//! # Behavior
//! - Rooms are created on first join and destroyed on last leave; a room
//!   exists iff it has members
//! - A connection belongs to at most one room; joining another room
//!   switches quietly (no departure broadcast)
//! - Joins and leaves are announced to the whole room; chat goes to every
//!   member including the sender; typing relays skip the sender
//! - Invalid or stale events are silently dropped, duplicate transitions
//!   are no-ops
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `Broker` is the central actor owning all membership state
//! - Each connection has a `handler` task communicating with the broker
//! - No locks needed - commands are serialized through one mailbox, so
//!   every membership transition runs atomically
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use room_broker::{Broker, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:3001").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(Broker::new(cmd_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod broker;
pub mod error;
pub mod handler;
pub mod message;
pub mod participant;
pub mod registry;
pub mod room;
pub mod router;
pub mod types;

// Re-export main types for convenience
pub use broker::{Broker, BrokerCommand};
pub use error::{AppError, SendError};
pub use handler::handle_connection;
pub use message::{ClientEvent, ServerEvent};
pub use participant::Participant;
pub use registry::{ConnectionRegistry, RoomRegistry};
pub use room::Room;
pub use types::{ConnId, RoomId};
