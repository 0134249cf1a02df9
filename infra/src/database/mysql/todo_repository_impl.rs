//! MySQL implementation of the TodoRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use todo_core::domain::entities::Todo;
use todo_core::errors::DomainError;
use todo_core::repositories::TodoRepository;

use crate::database::{column_error, storage_error};

/// MySQL implementation of TodoRepository
#[derive(Clone)]
pub struct MySqlTodoRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTodoRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Todo entity
    fn row_to_todo(row: &MySqlRow) -> Result<Todo, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let creator_id: String = row
            .try_get("creator_id")
            .map_err(|e| column_error("creator_id", e))?;

        Ok(Todo {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            text: row.try_get("text").map_err(|e| column_error("text", e))?,
            completed: row
                .try_get("completed")
                .map_err(|e| column_error("completed", e))?,
            completed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("completed_at")
                .map_err(|e| column_error("completed_at", e))?,
            creator_id: Uuid::parse_str(&creator_id).map_err(|e| column_error("creator_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }
}

#[async_trait]
impl TodoRepository for MySqlTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, creator_id, text, completed, completed_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(todo.id.to_string())
        .bind(todo.creator_id.to_string())
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.completed_at)
        .bind(todo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to create todo", e))?;

        Ok(todo)
    }

    async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<Todo>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, creator_id, text, completed, completed_at, created_at
            FROM todos
            WHERE creator_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(creator_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list todos", e))?;

        rows.iter().map(Self::row_to_todo).collect()
    }

    async fn find_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, creator_id, text, completed, completed_at, created_at
            FROM todos
            WHERE id = ? AND creator_id = ?
            LIMIT 1
            "#,
        )
        .bind(id.to_string())
        .bind(creator_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find todo", e))?;

        row.as_ref().map(Self::row_to_todo).transpose()
    }

    async fn update(&self, todo: &Todo) -> Result<Option<Todo>, DomainError> {
        sqlx::query(
            r#"
            UPDATE todos SET text = ?, completed = ?, completed_at = ?
            WHERE id = ? AND creator_id = ?
            "#,
        )
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.completed_at)
        .bind(todo.id.to_string())
        .bind(todo.creator_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to update todo", e))?;

        // rows_affected counts changed rows only, so re-read to tell
        // "unchanged" apart from "not found"
        self.find_owned(todo.id, todo.creator_id).await
    }

    async fn delete_owned(&self, id: Uuid, creator_id: Uuid) -> Result<Option<Todo>, DomainError> {
        let Some(todo) = self.find_owned(id, creator_id).await? else {
            return Ok(None);
        };

        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND creator_id = ?")
            .bind(id.to_string())
            .bind(creator_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete todo", e))?;

        Ok((result.rows_affected() > 0).then_some(todo))
    }
}
