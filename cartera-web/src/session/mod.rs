//! Session lifecycle: persisted storage, the expiry state machine, and the
//! Yew provider that exposes it to pages.

pub mod manager;
pub mod provider;
pub mod store;

pub use provider::{SessionHandle, SessionProvider};
