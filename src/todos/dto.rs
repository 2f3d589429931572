use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::todos::repo::{Todo, TodoState};

#[derive(Debug, Deserialize)]
pub struct TodoPayload {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub state: TodoState,
}

/// Partial update: only supplied fields change.
#[derive(Debug, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

#[derive(Debug, Serialize)]
pub struct TodoPublic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

const FILTER_MIN_LEN: usize = 3;
const FILTER_MAX_LEN: usize = 15;

#[derive(Debug, Default, Deserialize)]
pub struct TodoFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl TodoFilter {
    /// Substring filters must be 3-15 characters; out-of-range values are
    /// rejected rather than silently ignored.
    pub fn validate(&self) -> Result<(), ApiError> {
        check_filter_len("title", self.title.as_deref())?;
        check_filter_len("description", self.description.as_deref())?;
        Ok(())
    }
}

fn check_filter_len(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    if let Some(value) = value {
        let len = value.chars().count();
        if !(FILTER_MIN_LEN..=FILTER_MAX_LEN).contains(&len) {
            return Err(ApiError::Validation(format!(
                "{field} filter must be between {FILTER_MIN_LEN} and {FILTER_MAX_LEN} characters"
            )));
        }
    }
    Ok(())
}
