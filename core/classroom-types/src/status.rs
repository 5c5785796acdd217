//! Status feed records.

use crate::ProfileSummary;
use serde::{Deserialize, Serialize};

/// A comment on a status.
///
/// `status_id` points back at the owning [`StatusItem`]; the comment itself is
/// owned by that status's `comments` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub status_id: String,
    pub body: String,
    /// ISO-8601, passed through from upstream untouched.
    pub created_at: String,
    pub owner: ProfileSummary,
}

/// A status post in the classroom feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItem {
    pub id: String,
    pub body: String,
    pub created_at: String,
    pub owner: ProfileSummary,
    /// Number of distinct resolved like identifiers.
    pub like_count: usize,
    /// Whether the requesting viewer is among the likers. Computed, never
    /// read from upstream.
    pub is_liked: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
}
