//! Todo entity owned by exactly one user.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A single task on a user's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub text: String,

    pub completed: bool,

    /// Set iff `completed` is true; serialized as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Owning user
    #[serde(rename = "_creator")]
    pub creator_id: Uuid,

    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Partial update of a todo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    /// Creates a new, incomplete todo for `creator_id`
    pub fn new(creator_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            completed_at: None,
            creator_id,
            created_at: Utc::now(),
        }
    }

    /// Applies a patch
    ///
    /// `completed: true` marks the todo complete and stamps `completed_at`
    /// with the current time. Any other value, including an absent one,
    /// clears both fields.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }

        if patch.completed == Some(true) {
            self.completed = true;
            self.completed_at = Some(Utc::now());
        } else {
            self.completed = false;
            self.completed_at = None;
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}
