//! Profile summaries and the organisation records reserved on them.

use serde::{Deserialize, Serialize};

/// A company a student is placed with. Reserved; mapped output leaves it null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomCompany {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_th: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
}

/// A school a student came from. Reserved; mapped output leaves it null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomSchool {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_th: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
}

/// An advising teacher. Reserved; mapped output leaves it null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassroomTeacher {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name_th: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_th: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A normalized view of a person.
///
/// `id` is never empty. `full_name` falls back to `email`, then to `id`, so it
/// is never empty either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company: Option<ClassroomCompany>,
    #[serde(default)]
    pub school: Option<ClassroomSchool>,
    #[serde(default)]
    pub teacher: Option<ClassroomTeacher>,
}

impl ProfileSummary {
    /// Creates a profile that only knows its identity fields.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: full_name.into(),
            student_id: None,
            class_year: None,
            avatar_url: None,
            company: None,
            school: None,
            teacher: None,
        }
    }

    /// Returns the email, or `None` when the upstream never sent one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        if self.email.is_empty() {
            None
        } else {
            Some(&self.email)
        }
    }
}
