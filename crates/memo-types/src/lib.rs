//! Memo Types - Pure type definitions shared across the workspace
//!
//! This crate contains only plain data types with no runtime or database
//! dependencies, so it can be reused by clients and tooling.

pub mod memo;

pub use memo::*;
