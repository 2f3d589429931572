use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use time::OffsetDateTime;

use crate::todos::dto::{TodoFilter, TodoPatch};

/// Fixed task-state enumeration. "trash" is an ordinary client-chosen state,
/// not a system tombstone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TodoState {
    Todo,
    Doing,
    Done,
    Trash,
}

impl Default for TodoState {
    fn default() -> Self {
        TodoState::Todo
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Todo {
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        title: &str,
        description: &str,
        state: TodoState,
    ) -> sqlx::Result<Todo> {
        let now = OffsetDateTime::now_utc();
        sqlx::query_as::<_, Todo>(
            r#"
            INSERT INTO todos (user_id, title, description, state, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, title, description, state, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(state)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await
    }

    /// Caller-scoped listing. Ownership is part of the WHERE clause, so rows
    /// of other users never reach the application layer.
    pub async fn list(
        db: &SqlitePool,
        user_id: i64,
        filter: &TodoFilter,
    ) -> sqlx::Result<Vec<Todo>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, user_id, title, description, state, created_at, updated_at \
             FROM todos WHERE user_id = ",
        );
        query.push_bind(user_id);

        if let Some(title) = &filter.title {
            query.push(" AND title LIKE '%' || ");
            query.push_bind(title);
            query.push(" || '%'");
        }
        if let Some(description) = &filter.description {
            query.push(" AND description LIKE '%' || ");
            query.push_bind(description);
            query.push(" || '%'");
        }
        if let Some(state) = filter.state {
            query.push(" AND state = ");
            query.push_bind(state);
        }

        query.push(" ORDER BY id LIMIT ");
        query.push_bind(filter.limit);
        query.push(" OFFSET ");
        query.push_bind(filter.offset);

        query.build_query_as::<Todo>().fetch_all(db).await
    }

    /// Owner-scoped partial update in a single statement: unset fields keep
    /// their current value via COALESCE. Returns None when the row is
    /// missing or owned by someone else.
    pub async fn update_owned(
        db: &SqlitePool,
        user_id: i64,
        id: i64,
        patch: &TodoPatch,
    ) -> sqlx::Result<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            UPDATE todos
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                state = COALESCE(?, state),
                updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, title, description, state, created_at, updated_at
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.state)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn delete_owned(
        db: &SqlitePool,
        user_id: i64,
        id: i64,
    ) -> sqlx::Result<Option<Todo>> {
        sqlx::query_as::<_, Todo>(
            r#"
            DELETE FROM todos
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, title, description, state, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }
}
