//! Memo entity and request payloads

use serde::{Deserialize, Serialize};

/// Maximum allowed title length, in characters.
///
/// Titles longer than this are rejected at the API boundary rather than
/// silently truncated by the storage engine.
pub const TITLE_MAX_LEN: usize = 100;

/// A stored memo. The id is assigned by the database on insert and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Payload for creating a new memo. Both fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemo {
    pub title: String,
    pub content: String,
}
