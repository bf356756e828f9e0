//! `gestion-session` — current-identity store over durable local storage.
//!
//! One process (one browser-tab analog) owns exactly one current identity.
//! The store hydrates it from durable storage at startup, mirrors changes
//! back on login/logout, and exposes the permission evaluator bound to
//! whoever is signed in.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{AUTH_FLAG_KEY, IDENTITY_KEY, SessionError, SessionStore};
