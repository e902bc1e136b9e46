//! Actor+Relay primitives the dashboard widgets are built on.
//!
//! - **[`Relay`]** carries UI events into an actor
//! - **[`Actor`]** owns one piece of state and mutates it sequentially
//!
//! Relays follow the `{source}_{event}_relay` naming pattern and each relay
//! is sent from exactly one place in the code.

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, relay};
