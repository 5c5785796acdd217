use crate::ProfileSummary;
use serde::{Deserialize, Serialize};

/// A classroom directory entry: a profile plus optional contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomMember {
    #[serde(flatten)]
    pub profile: ProfileSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ClassroomMember {
    #[must_use]
    pub fn new(profile: ProfileSummary) -> Self {
        Self {
            profile,
            contact: None,
            bio: None,
        }
    }
}
