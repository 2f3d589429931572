use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, instrument};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::todos::dto::{Message, TodoFilter, TodoList, TodoPatch, TodoPayload, TodoPublic};
use crate::todos::repo::Todo;

const NOT_FOUND_ERROR: &str = "Task not found";

/// POST /todos/ — create a task attached to the caller.
#[instrument(skip(state, user, payload))]
pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<TodoPayload>,
) -> Result<Json<TodoPublic>, ApiError> {
    let todo = Todo::create(
        &state.db,
        user.id,
        &payload.title,
        &payload.description,
        payload.state,
    )
    .await?;

    info!(user_id = user.id, todo_id = todo.id, "todo created");
    Ok(Json(todo.into()))
}

/// GET /todos/ — list the caller's tasks with optional ANDed filters.
#[instrument(skip(state, user))]
pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(filter): Query<TodoFilter>,
) -> Result<Json<TodoList>, ApiError> {
    filter.validate()?;

    let todos = Todo::list(&state.db, user.id, &filter).await?;
    Ok(Json(TodoList {
        todos: todos.into_iter().map(TodoPublic::from).collect(),
    }))
}

/// PATCH /todos/:id — partial update. Rows owned by other users are
/// indistinguishable from missing ones.
#[instrument(skip(state, user, patch))]
pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<TodoPublic>, ApiError> {
    let todo = Todo::update_owned(&state.db, user.id, id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_ERROR.into()))?;

    info!(user_id = user.id, todo_id = todo.id, "todo updated");
    Ok(Json(todo.into()))
}

/// DELETE /todos/:id — owner-scoped hard delete.
#[instrument(skip(state, user))]
pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    Todo::delete_owned(&state.db, user.id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_ERROR.into()))?;

    info!(user_id = user.id, todo_id = id, "todo deleted");
    Ok((
        StatusCode::ACCEPTED,
        Json(Message {
            message: "Task has been deleted successfully".into(),
        }),
    ))
}
