//! Client-side admin gate for opsdeck UI shells.
//!
//! A UI embeds a [`GateClient`] in front of protected views: on mount
//! it resolves the server's admin status endpoint exactly once, and the
//! view renders nothing while the gate is [`GateState::Pending`]. Any
//! failure (transport, a non-success status, a malformed payload)
//! resolves to "not admin"; the gate never leaves a caller pending
//! indefinitely. Call sites choose between a login redirect and a
//! passive denial via [`GateClient::redirect_on_deny`].

mod client;
mod error;
mod state;

pub use client::GateClient;
pub use error::GateError;
pub use state::{GateOutcome, GateState};
