//! Membank - a memory bank tool server for chat clients
//!
//! Membank speaks MCP over stdio and exposes tools that save the client's
//! latest response into a per-process session, replay it, and report on the
//! backing context database.

pub mod capture;
pub mod error;
pub mod id;
pub mod protocol;
pub mod server;
pub mod session;
pub mod store;
pub mod tools;

pub use error::{MembankError, Result};
