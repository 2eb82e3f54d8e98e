pub mod client;
pub mod wire;

pub use client::{ScriptBackend, DEFAULT_TIMEOUT_SECS};
