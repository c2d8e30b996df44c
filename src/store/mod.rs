//! Backing store access.
//!
//! The context database is only inspected (table names, file size). Nothing in
//! membank writes to it.

mod database;

pub use database::{DatabaseStatus, database_status, format_size};
