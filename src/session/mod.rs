//! Connection and stream sessions.
//!
//! # Stream state machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← accumulate request bytes
//!        └────────┬─────────┘
//!                 │ zero-length read (end of request)
//!                 ▼
//!        ┌──────────────────┐
//!        │ RequestComplete  │ ← parse, resolve, pick 200 / 400 / 404
//!        └────────┬─────────┘
//!                 │ read side shut, write interest registered
//!                 ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← head sent on first write readiness
//!        └────────┬─────────┘
//!                 ▼
//!        ┌──────────────────┐
//!        │    Draining      │ ← body written as the transport accepts it
//!        └────────┬─────────┘
//!                 │ reader exhausted, write side shut
//!                 ▼
//!             Finished
//! ```
//!
//! Read or write errors move any state to `Closed`. The close event is
//! accepted in every state.

pub mod connection;
pub mod state;
pub mod stream;

pub use connection::ConnectionSession;
pub use state::ServerState;
pub use stream::{StreamSession, StreamState};
