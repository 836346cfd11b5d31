//! Storage layer
//!
//! Uses SQLite (embedded) so no external database server is required.

pub mod db;

pub use db::Database;
