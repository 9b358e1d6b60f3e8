use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonRef {
    pub id: String,
    pub title: Option<String>,
}

impl PersonRef {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CircleRecord {
    pub circle_id: String,
    pub name: String,
    pub purpose: Option<String>,
    pub responsibilities: Option<String>,
    pub projects: Option<String>,
}

/// A role as stored in the roles database.
///
/// `circle_id` keeps whatever text the upstream stored; membership is decided
/// by [`crate::hierarchy::normalize_id`], never by comparing this string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleRecord {
    pub role_id: String,
    pub name: String,
    pub circle_id: String,
    pub purpose: Option<String>,
    pub responsibilities: Option<String>,
    pub people: Vec<PersonRef>,
    pub page_id: Option<String>,
    pub area: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("record {index}: {reason}")]
pub struct InvalidRecord {
    pub index: usize,
    pub reason: String,
}
