pub mod client;
pub mod protocol;

pub use client::{dispatch, NetworkClient, Reply};
pub use protocol::{ClientMessage, ServerMessage};
