//! HTTP handlers

pub mod health;
pub mod memos;

pub use health::health;
